//! Module for some utility functions, including debug
//!
use std::char;
use std::io::Cursor;

// A length byte whose two top bits are set starts a 2-byte compression pointer
// as explained in the RFC1035
pub fn is_pointer(x: u8) -> bool {
    x & 0b1100_0000 == 0b1100_0000
}

// A domain name is null terminated or terminated by a pointer
pub fn is_sentinel(x: u8) -> bool {
    x == 0 || is_pointer(x)
}

// Convert a wireshark-like hex dump into bytes. Each line starts with an
// offset column which is skipped:
//
// 0000   76 86 81 a0 00 01 00 08 00 00 00 01
pub fn get_sample_slice(dump: &str) -> Vec<u8> {
    dump.lines()
        .filter(|line| !line.trim().is_empty())
        .flat_map(|line| {
            line.split_whitespace()
                .skip(1)
                .map(|x| u8::from_str_radix(x, 16).unwrap())
        })
        .collect()
}

// Debug utility
pub fn pretty_cursor(buffer: &Cursor<&[u8]>) {
    let reference = buffer.get_ref();

    eprintln!("position={}", buffer.position());

    let mut i = 0usize;
    eprint!("index:");
    for _ in *reference {
        eprint!("{:02} ", i);
        i += 1;
    }
    eprintln!();

    eprint!("byte :");
    for x in *reference {
        eprint!("{:02X} ", x);
    }
    eprintln!();

    eprint!("ascii:");
    for x in *reference {
        let c = char::from_u32(*x as u32).unwrap();
        if c.is_ascii_alphanumeric() {
            eprint!("{:>2} ", c);
        } else {
            eprint!("   ");
        }
    }
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_slice() {
        const DUMP: &str = r#"
0000   12 34 01 00 00 01
0006   00 00 00 00 00 00
"#;
        assert_eq!(
            get_sample_slice(DUMP),
            &[0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn pointer_bytes() {
        assert!(is_pointer(0xC0));
        assert!(is_pointer(0xFF));
        assert!(!is_pointer(0x3F));
        assert!(!is_pointer(0x80));
        assert!(is_sentinel(0));
        assert!(!is_sentinel(0x3F));
    }
}
