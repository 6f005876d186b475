use std::borrow::Cow;

use locator_app_lib::mk_specta;
use specta_typescript::Typescript;

const DEFAULT_BINDINGS_PATH: &str = "../ui/bindings.ts";

pub fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BINDINGS_PATH.to_string());
    let mut lang = Typescript::new();
    lang.header = Cow::Borrowed("/* eslint @typescript-eslint/no-unused-vars: 0 */");
    mk_specta()
        .export(lang, &path)
        .expect("Failed to export location bindings");
    println!("Exported location commands and events to {path}");
}
