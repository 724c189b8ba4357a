/// Turn a ROM filename into a display/search name.
///
/// Drops the final extension, swaps underscores for spaces and cuts the name at
/// the first `" ("` so region and revision tags disappear:
/// - `"super_mario_bros_(U).nes"` → `"super mario bros"`
/// - `"Zelda II (Rev 1).nes"` → `"Zelda II"`
/// - `"Tetris"` → `"Tetris"`
pub fn normalize(filename: &str) -> String {
    let stem = match filename.rfind('.') {
        Some(pos) => &filename[..pos],
        None => filename,
    };
    let mut name = stem.replace('_', " ");
    if let Some(pos) = name.find(" (") {
        name.truncate(pos);
    }
    name
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
