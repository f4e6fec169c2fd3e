/// Normalize a user-supplied color (named or `#rgb`/`#rrggbb` hex) into a
/// lowercase `#rrggbb` string. Returns `None` for anything unrecognizable.
pub fn normalize_color(val: &str) -> Option<String> {
    let val = val.trim();
    if let Some(hex) = val.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        return match hex.len() {
            6 => Some(format!("#{}", hex.to_ascii_lowercase())),
            // Expand #rgb shorthand to #rrggbb
            3 => {
                let mut out = String::with_capacity(7);
                out.push('#');
                for c in hex.chars() {
                    let c = c.to_ascii_lowercase();
                    out.push(c);
                    out.push(c);
                }
                Some(out)
            }
            _ => None,
        };
    }
    let named = match val.to_ascii_lowercase().as_str() {
        "white" => Some("#ffffff"),
        "black" => Some("#000000"),
        "red" => Some("#ff0000"),
        "green" => Some("#00ff00"),
        "blue" => Some("#0000ff"),
        "yellow" => Some("#ffff00"),
        "orange" => Some("#ffa500"),
        "cyan" => Some("#00ffff"),
        "magenta" => Some("#ff00ff"),
        "lightblue" => Some("#add8e6"),
        "darkgreen" => Some("#006400"),
        "gray" | "grey" => Some("#808080"),
        "lightgray" | "lightgrey" => Some("#d3d3d3"),
        "darkgray" | "darkgrey" => Some("#a9a9a9"),
        "brown" => Some("#a52a2a"),
        "purple" => Some("#800080"),
        "pink" => Some("#ffc0cb"),
        "lime" => Some("#00ff00"),
        "navy" => Some("#000080"),
        "teal" => Some("#008080"),
        "olive" => Some("#808000"),
        "maroon" => Some("#800000"),
        "silver" => Some("#c0c0c0"),
        _ => None,
    };
    named.map(str::to_string)
}
