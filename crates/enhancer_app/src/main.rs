#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    enhancer_app::platform::run_app()
}

// WASM entrypoint for Trunk; native builds run the headless driver above.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    enhancer_app::start();
}
