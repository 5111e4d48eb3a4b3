//! Entry point for the WASM application

pub fn main() {
    paperdrop::start();
}
