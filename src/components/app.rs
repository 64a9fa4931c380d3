use yew::prelude::*;

use super::base64_tool::Base64Tool;
use super::json_tool::JsonTool;
use super::jwt_tool::JwtTool;
use super::sidebar::{Sidebar, Tool};
use super::uuid_tool::UuidTool;
use super::webp_tool::WebpTool;

#[function_component(App)]
pub fn app() -> Html {
    let tool = use_state(|| Tool::Json);
    let sidebar_open = use_state(|| false);

    let on_select = {
        let tool = tool.clone();
        let sidebar_open = sidebar_open.clone();
        Callback::from(move |t: Tool| {
            tool.set(t);
            sidebar_open.set(false);
        })
    };

    let on_close = {
        let sidebar_open = sidebar_open.clone();
        Callback::from(move |_| sidebar_open.set(false))
    };

    let on_open = {
        let sidebar_open = sidebar_open.clone();
        Callback::from(move |_| sidebar_open.set(true))
    };

    let content = match *tool {
        Tool::Json => html! { <JsonTool /> },
        Tool::Base64 => html! { <Base64Tool /> },
        Tool::Uuid => html! { <UuidTool /> },
        Tool::Jwt => html! { <JwtTool /> },
        Tool::Webp => html! { <WebpTool /> },
    };

    html! {
      <div class="shell">
        <Sidebar
          active={*tool}
          open={*sidebar_open}
          on_select={on_select}
          on_close={on_close}
        />

        <main class="main">
          <div class="mobile-bar">
            <button class="btn ghost" onclick={on_open}>{ "☰" }</button>
            <span class="brand-name">{ "DevForge" }</span>
          </div>

          <div class="content">
            { content }
          </div>
        </main>
      </div>
    }
}
