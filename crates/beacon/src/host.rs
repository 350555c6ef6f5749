// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The page that third-party tracking scripts run in.
//!
//! [`ScriptHost`] is the seam between the tracking manager and the document:
//! script injection, global lookups and calls into the platform SDKs all go
//! through it. [`DocumentHost`] is an in-process implementation that records
//! everything and can render it as `<head>` markup for server-rendered pages.

use std::collections::BTreeSet;

use parking_lot::Mutex;
use serde_json::Value;

use beacon_core::PlatformKind;

/// A `<script src>` tag to inject into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTag {
	pub platform: PlatformKind,
	pub src: String,
	pub is_async: bool,
}

/// A call into a platform SDK's page global.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
	/// `window.<function>(args...)`, e.g. `gtag('event', ...)` or `fbq('track', ...)`.
	Call { function: String, args: Vec<Value> },
	/// `window.<queue>.push(args...)`, e.g. `uetq.push(...)`.
	Push { queue: String, args: Vec<Value> },
	/// `window.<global> = new <constructor>(options)` with the pending queue attached.
	Construct {
		global: String,
		constructor: String,
		options: Value,
	},
}

impl HostCommand {
	pub fn call(function: &str, args: Vec<Value>) -> Self {
		HostCommand::Call {
			function: function.to_string(),
			args,
		}
	}

	pub fn push(queue: &str, args: Vec<Value>) -> Self {
		HostCommand::Push {
			queue: queue.to_string(),
			args,
		}
	}

	/// Name of the page global this command targets.
	pub fn target(&self) -> &str {
		match self {
			HostCommand::Call { function, .. } => function,
			HostCommand::Push { queue, .. } => queue,
			HostCommand::Construct { global, .. } => global,
		}
	}

	/// Arguments of a call or push; empty for constructions.
	pub fn args(&self) -> &[Value] {
		match self {
			HostCommand::Call { args, .. } | HostCommand::Push { args, .. } => args,
			HostCommand::Construct { .. } => &[],
		}
	}

	/// Renders the command as a JavaScript statement.
	pub fn to_js(&self) -> String {
		match self {
			HostCommand::Call { function, args } => {
				format!("window.{function}({});", js_args(args))
			}
			HostCommand::Push { queue, args } => {
				format!("window.{queue} = window.{queue} || []; window.{queue}.push({});", js_args(args))
			}
			HostCommand::Construct {
				global,
				constructor,
				options,
			} => format!(
				"window.{global} = new {constructor}(Object.assign({}, {{ q: window.{global} || [] }}));",
				js_value(options)
			),
		}
	}
}

fn js_value(value: &Value) -> String {
	// JSON is valid JS; `</` must not terminate the surrounding script element.
	value.to_string().replace("</", "<\\/")
}

fn js_args(args: &[Value]) -> String {
	args.iter().map(js_value).collect::<Vec<_>>().join(", ")
}

/// The document tracking scripts are injected into.
pub trait ScriptHost: Send + Sync {
	/// Returns true if the page already defines the named global.
	fn has_global(&self, name: &str) -> bool;

	/// Appends a script tag to the page. The platform's global is defined
	/// immediately by its inline loader snippet, before the script loads.
	fn inject_script(&self, script: ScriptTag);

	/// Invokes a platform SDK global.
	fn execute(&self, command: HostCommand);
}

#[derive(Debug, Default)]
struct DocumentState {
	scripts: Vec<ScriptTag>,
	commands: Vec<HostCommand>,
	globals: BTreeSet<String>,
}

/// In-process document that records injected scripts and SDK calls.
#[derive(Debug, Default)]
pub struct DocumentHost {
	state: Mutex<DocumentState>,
}

impl DocumentHost {
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares a global as already present, as if an earlier mount injected it.
	pub fn with_global(self, name: &str) -> Self {
		self.state.lock().globals.insert(name.to_string());
		self
	}

	pub fn scripts(&self) -> Vec<ScriptTag> {
		self.state.lock().scripts.clone()
	}

	pub fn commands(&self) -> Vec<HostCommand> {
		self.state.lock().commands.clone()
	}

	/// Commands addressed to one page global, in execution order.
	pub fn commands_for(&self, global: &str) -> Vec<HostCommand> {
		self
			.state
			.lock()
			.commands
			.iter()
			.filter(|c| c.target() == global)
			.cloned()
			.collect()
	}

	/// Removes and returns every recorded command.
	pub fn drain_commands(&self) -> Vec<HostCommand> {
		std::mem::take(&mut self.state.lock().commands)
	}

	/// Renders injected scripts followed by one inline script with every
	/// recorded command.
	pub fn render_head(&self) -> String {
		let state = self.state.lock();
		let mut html = String::new();
		for script in &state.scripts {
			let async_attr = if script.is_async { " async" } else { "" };
			html.push_str(&format!("<script{async_attr} src=\"{}\"></script>\n", script.src));
		}
		if !state.commands.is_empty() {
			html.push_str("<script>\n");
			for command in &state.commands {
				html.push_str(&command.to_js());
				html.push('\n');
			}
			html.push_str("</script>\n");
		}
		html
	}
}

impl ScriptHost for DocumentHost {
	fn has_global(&self, name: &str) -> bool {
		self.state.lock().globals.contains(name)
	}

	fn inject_script(&self, script: ScriptTag) {
		let mut state = self.state.lock();
		state.globals.insert(script.platform.global_name().to_string());
		state.scripts.push(script);
	}

	fn execute(&self, command: HostCommand) {
		self.state.lock().commands.push(command);
	}
}
