fn main() {
    match modal_ui::start() {
        Ok(bindings) => bindings.keep_alive(),
        Err(e) => {
            tracing::error!("Failed to start modal: {e}");
            wasm_bindgen::throw_str(&e.to_string());
        }
    }
}
