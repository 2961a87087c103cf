//! Host-native passthroughs (native events, commands, UI focus).
//!
//! These never touch the envelope protocol; adapters only validate names
//! against the allow-lists before handing them over.

use std::sync::Arc;

use serde_json::Value;

use tribridge_core::PlayerId;

/// Native event callback, called with the host's raw arguments.
pub type NativeCallback = Arc<dyn Fn(Vec<Value>) + Send + Sync>;

/// Command callback: `(source player, arguments, raw command line)`.
pub type CommandCallback = Arc<dyn Fn(PlayerId, Vec<String>, String) + Send + Sync>;

pub trait NativeHost: Send + Sync {
    fn on_native(&self, event: &str, callback: NativeCallback);

    fn register_command(&self, name: &str, callback: CommandCallback, restricted: bool);

    /// Give or take keyboard/mouse focus to the webview (client only).
    fn set_ui_focus(&self, has_focus: bool, has_cursor: bool);
}
