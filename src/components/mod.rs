mod app;
mod base64_tool;
mod json_tool;
mod jwt_tool;
mod sidebar;
mod uuid_tool;
mod webp_tool;

pub use app::App;

use yew::prelude::*;

/// Read the current value of a `<textarea>` from its input event.
pub(crate) fn textarea_value(e: InputEvent) -> String {
    e.target_unchecked_into::<web_sys::HtmlTextAreaElement>().value()
}
