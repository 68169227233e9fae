mod app;
mod config;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod fragment;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod keyboard;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod navigator;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod preview;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod sections;

fn main() {
    dioxus::launch(app::App);
}
