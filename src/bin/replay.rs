//! Replay a recorded input script through a controller on the in-memory host.
//!
//! ```text
//! replay script.json
//! replay < script.json
//! ```
//!
//! Prints one JSON line per reported gesture and one line per raw event
//! telling whether its default action was prevented.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::info;
use unipointer::constants::DEFAULT_LOG_FILTER;
use unipointer::host::memory::MemoryNode;
use unipointer::types::{EventKind, EventPayload, InputEvent, MouseInput, Rect, TouchInput, WheelInput};
use unipointer::{Callbacks, ContactMode, ControlParams, InputSettings, PointerController, logging};

#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    mode: ContactMode,
    /// Bounding rect of the start element
    #[serde(default)]
    offset: Option<Rect>,
    #[serde(default)]
    settings: Option<PathBuf>,
    /// Value every callback returns
    #[serde(default)]
    suppress: bool,
    events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Node {
    #[default]
    Start,
    Root,
}

#[derive(Debug, Deserialize)]
struct ScriptEvent {
    #[serde(default)]
    target: Node,
    kind: EventKind,
    mouse: Option<MouseInput>,
    touch: Option<TouchInput>,
    wheel: Option<WheelInput>,
}

impl ScriptEvent {
    fn to_event(&self) -> Result<InputEvent> {
        let payload = match (self.kind, &self.mouse, &self.touch, &self.wheel) {
            (
                EventKind::MouseDown | EventKind::MouseMove | EventKind::MouseUp | EventKind::MouseLeave,
                Some(m),
                _,
                _,
            ) => EventPayload::Mouse(*m),
            (
                EventKind::TouchStart | EventKind::TouchMove | EventKind::TouchEnd | EventKind::TouchCancel,
                _,
                Some(t),
                _,
            ) => EventPayload::Touch(t.clone()),
            (EventKind::Wheel, _, _, Some(w)) => EventPayload::Wheel(*w),
            (kind, ..) => bail!("{kind} event is missing its payload"),
        };
        Ok(InputEvent::new(self.kind, payload))
    }
}

fn read_script() -> Result<Script> {
    let json = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading script from stdin")?;
            buf
        }
    };
    serde_json::from_str(&json).context("parsing script")
}

fn main() -> Result<()> {
    logging::init(DEFAULT_LOG_FILTER);
    let script = read_script()?;

    let settings = match &script.settings {
        Some(path) => InputSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => InputSettings::default(),
    };

    let root = MemoryNode::root("root");
    let start = root.child("start");
    if let Some(rect) = script.offset {
        start.set_rect(rect);
    }

    let suppress = script.suppress;
    let callbacks = Callbacks::forward_all(move |_, gesture| {
        match serde_json::to_string(gesture) {
            Ok(line) => println!("{line}"),
            Err(err) => eprintln!("cannot serialize gesture: {err}"),
        }
        suppress
    });
    let controller = PointerController::with_settings(script.mode, callbacks, &settings);
    controller.on(&ControlParams::new(start.as_element()).with_move_target(root.as_target()))?;
    info!(mode = ?script.mode, events = script.events.len(), "Replaying script");

    for (index, scripted) in script.events.iter().enumerate() {
        let event = scripted.to_event().with_context(|| format!("event #{index}"))?;
        let node: &Rc<MemoryNode> = match scripted.target {
            Node::Start => &start,
            Node::Root => &root,
        };
        node.dispatch(&event)
            .with_context(|| format!("dispatching event #{index} ({})", event.kind()))?;
        println!(
            "{}",
            serde_json::json!({ "event": index, "kind": event.kind(), "prevented": event.default_prevented() })
        );
    }

    controller.off();
    Ok(())
}
