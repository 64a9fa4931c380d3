// src/main.rs
use devforge::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
