//! Bakes IGDB client credentials into the binary when both
//! `IGDB_CLIENT_ID` and `IGDB_CLIENT_SECRET` are set at build time.
//! Values are XOR-masked so they don't show up in `strings` output.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

const MASK: &[u8] = b"romshelf-igdb-obfuscation-41c7";
const ID_VAR: &str = "IGDB_CLIENT_ID";
const SECRET_VAR: &str = "IGDB_CLIENT_SECRET";

fn main() {
    println!("cargo:rerun-if-env-changed={ID_VAR}");
    println!("cargo:rerun-if-env-changed={SECRET_VAR}");

    let out = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));

    let id = non_blank(ID_VAR);
    let secret = non_blank(SECRET_VAR);
    if id.is_some() != secret.is_some() {
        println!(
            "cargo:warning=only one of {ID_VAR} / {SECRET_VAR} is set; no credentials embedded"
        );
    }

    let mut code = format!("const OBFUSCATION_KEY: &[u8] = &{MASK:?};\n");
    let (id, secret) = match (id, secret) {
        (Some(id), Some(secret)) => (Some(mask(&id)), Some(mask(&secret))),
        _ => (None, None),
    };
    emit(&mut code, "EMBEDDED_CLIENT_ID", id.as_deref());
    emit(&mut code, "EMBEDDED_CLIENT_SECRET", secret.as_deref());

    fs::write(out.join("embedded_credentials.rs"), code)
        .expect("write embedded_credentials.rs");
}

/// Read a build-time variable, ignoring unset or whitespace-only values.
fn non_blank(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn mask(value: &str) -> Vec<u8> {
    value
        .bytes()
        .zip(MASK.iter().cycle())
        .map(|(b, k)| b ^ k)
        .collect()
}

fn emit(code: &mut String, name: &str, bytes: Option<&[u8]>) {
    let _ = match bytes {
        Some(bytes) => writeln!(code, "const {name}: Option<&[u8]> = Some(&{bytes:?});"),
        None => writeln!(code, "const {name}: Option<&[u8]> = None;"),
    };
}
