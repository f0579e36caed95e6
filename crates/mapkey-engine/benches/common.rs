// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_mapkey_file(records: usize) -> String {
    let mut content = String::from("! generated mapkeys\n!#region bench\n");
    for i in 0..records {
        content.push_str(&format!(
            "mapkey k{i} @MAPKEY_NAMERecord {i};@MAPKEY_LABELLabel\\\n"
        ));
        content.push_str("mapkey(continued)  for the record;~ Command `ProCmdModelOpen`;\\\n");
        if i + 1 < records {
            content.push_str(&format!("mapkey(continued) %k{};\n", i + 1));
        } else {
            content.push_str("mapkey(continued) %missing;\n");
        }
    }
    content.push_str("!#endregion\n");
    content
}

/// `fan` calls per record to the next records, wrapping around into cycles.
#[allow(dead_code)]
pub fn generate_call_web(records: usize, fan: usize) -> String {
    let mut content = String::new();
    for i in 0..records {
        content.push_str(&format!("mapkey w{i}"));
        for f in 1..=fan {
            content.push_str(&format!(" %w{};", (i + f) % records));
        }
        content.push('\n');
    }
    content
}
