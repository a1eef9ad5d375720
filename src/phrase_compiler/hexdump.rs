// Annotated hex listing of a ROM image
// Output is a C array body, so it can be pasted into a PROGMEM declaration

use std::collections::BTreeMap;

/// Render `bytes` as `0xNN` values, `bytes_per_line` per line (0 disables
/// wrapping). When an annotated address is reached a comment block with the
/// address in pointer byte order is inserted and line counting restarts there.
pub fn hex_dump(bytes: &[u8], bytes_per_line: usize, comments: &BTreeMap<usize, String>) -> String {
    let mut out = String::with_capacity(bytes.len() * 6);
    let mut comment_offset = 0;

    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
            if bytes_per_line > 0 && (i - comment_offset) % bytes_per_line == 0 {
                out.push('\n');
            }
        }

        if let Some(comment) = comments.get(&i) {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&format!(
                "\n// Address: 0x{:02X}, 0x{:02X} - {}\n\n",
                i & 0xFF,
                (i >> 8) & 0xFF,
                comment
            ));
            comment_offset = i;
        }

        out.push_str(&format!("0x{:02X}", byte));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_listing() {
        let dump = hex_dump(&[0x01, 0xAB, 0xFF], 0, &BTreeMap::new());
        assert_eq!(dump, "0x01, 0xAB, 0xFF");
    }

    #[test]
    fn wraps_lines() {
        let dump = hex_dump(&[1, 2, 3, 4, 5], 2, &BTreeMap::new());
        assert_eq!(dump, "0x01, 0x02, \n0x03, 0x04, \n0x05");
    }

    #[test]
    fn comments_restart_line_counting() {
        let mut comments = BTreeMap::new();
        comments.insert(0, "Header".to_string());
        comments.insert(3, "Bank".to_string());
        let dump = hex_dump(&[1, 2, 3, 4, 5, 6], 2, &comments);
        assert_eq!(
            dump,
            "\n// Address: 0x00, 0x00 - Header\n\n0x01, 0x02, \n0x03, \n\n// Address: 0x03, 0x00 - Bank\n\n0x04, 0x05, \n0x06"
        );
    }

    #[test]
    fn address_is_little_endian() {
        let mut comments = BTreeMap::new();
        comments.insert(0x0102, "Word [hello]".to_string());
        let bytes = vec![0u8; 0x0103];
        let dump = hex_dump(&bytes, 0, &comments);
        assert!(dump.contains("// Address: 0x02, 0x01 - Word [hello]"));
    }
}
