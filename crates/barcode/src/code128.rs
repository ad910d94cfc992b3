//! Code 128 symbol encoding.
//!
//! Location codes are printable ASCII, so only code sets B and C are used:
//! B carries every character from space to `~`, C packs digit pairs into a
//! single symbol. Runs of digits long enough to pay for the shift symbol are
//! switched into C.

use crate::SymbolRenderError;

/// Start symbol selecting code set B.
pub const START_B: u8 = 104;
/// Start symbol selecting code set C.
pub const START_C: u8 = 105;
/// Shift into code set B (valid while in C).
pub const CODE_B: u8 = 100;
/// Shift into code set C (valid while in B).
pub const CODE_C: u8 = 99;
/// Stop symbol value.
pub const STOP: u8 = 106;

/// Bar/space widths in modules for symbol values 0..=105.
///
/// Each pattern starts with a bar and alternates; every pattern spans 11
/// modules.
const PATTERNS: [&[u8; 6]; 106] = [
    b"212222", b"222122", b"222221", b"121223", b"121322", b"131222", b"122213", b"122312",
    b"132212", b"221213", b"221312", b"231212", b"112232", b"122132", b"122231", b"113222",
    b"123122", b"123221", b"223211", b"221132", b"221231", b"213212", b"223112", b"312131",
    b"311222", b"321122", b"321221", b"312212", b"322112", b"322211", b"212123", b"212321",
    b"232121", b"111323", b"131123", b"131321", b"112313", b"132113", b"132311", b"211313",
    b"231113", b"231311", b"112133", b"112331", b"132131", b"113123", b"113321", b"133121",
    b"313121", b"211331", b"231131", b"213113", b"213311", b"213131", b"311123", b"311321",
    b"331121", b"312113", b"312311", b"332111", b"314111", b"221411", b"431111", b"111224",
    b"111422", b"121124", b"121421", b"141122", b"141221", b"112214", b"112412", b"122114",
    b"122411", b"142112", b"142211", b"241211", b"221114", b"413111", b"241112", b"134111",
    b"111242", b"121142", b"121241", b"114212", b"124112", b"124211", b"411212", b"421112",
    b"421211", b"212141", b"214121", b"412121", b"111143", b"111341", b"131141", b"114113",
    b"114311", b"411113", b"411311", b"113141", b"114131", b"311141", b"411131", b"211412",
    b"211214", b"211232",
];

/// The stop pattern, including the terminating bar (13 modules).
const STOP_PATTERN: &[u8; 7] = b"2331112";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeSet {
    B,
    C,
}

/// Encode `code` into Code 128 symbol values.
///
/// The result starts with a start symbol and ends with the modulo-103 check
/// symbol followed by [`STOP`].
pub fn encode(code: &str) -> Result<Vec<u8>, SymbolRenderError> {
    if code.is_empty() {
        return Err(SymbolRenderError::Empty);
    }
    if let Some((position, character)) = code.chars().enumerate().find(|(_, c)| !in_set_b(*c)) {
        return Err(SymbolRenderError::UnsupportedCharacter {
            code: code.to_owned(),
            character,
            position,
        });
    }

    // Set B only holds ASCII, so bytes and characters line up from here on.
    let bytes = code.as_bytes();
    let mut values = Vec::with_capacity(bytes.len() + 4);
    let mut set = if starts_in_c(bytes) {
        values.push(START_C);
        CodeSet::C
    } else {
        values.push(START_B);
        CodeSet::B
    };

    let mut i = 0;
    while i < bytes.len() {
        match set {
            CodeSet::C => {
                if digit_run(&bytes[i..]) >= 2 {
                    values.push((bytes[i] - b'0') * 10 + (bytes[i + 1] - b'0'));
                    i += 2;
                } else {
                    values.push(CODE_B);
                    set = CodeSet::B;
                }
            }
            CodeSet::B => {
                let run = digit_run(&bytes[i..]);
                if worth_switching(run, i + run == bytes.len()) {
                    if run % 2 == 1 {
                        values.push(bytes[i] - b' ');
                        i += 1;
                    }
                    values.push(CODE_C);
                    set = CodeSet::C;
                } else {
                    values.push(bytes[i] - b' ');
                    i += 1;
                }
            }
        }
    }

    values.push(checksum(&values));
    values.push(STOP);
    Ok(values)
}

/// Expand symbol values into alternating bar/space widths, starting with a
/// bar. Values must come from [`encode`].
pub fn modules(values: &[u8]) -> Vec<u8> {
    let mut widths = Vec::with_capacity(values.len() * 6 + 1);
    for &value in values {
        let pattern: &[u8] = if value == STOP {
            STOP_PATTERN
        } else {
            PATTERNS[usize::from(value)]
        };
        widths.extend(pattern.iter().map(|w| w - b'0'));
    }
    widths
}

/// Total symbol width in modules, quiet zones excluded.
pub fn module_count(values: &[u8]) -> u32 {
    modules(values).iter().map(|&w| u32::from(w)).sum()
}

/// Modulo-103 weighted checksum over the start symbol and data values.
fn checksum(values: &[u8]) -> u8 {
    let sum = values
        .iter()
        .enumerate()
        .map(|(i, &v)| u32::from(v) * (i.max(1) as u32))
        .sum::<u32>();
    (sum % 103) as u8
}

fn in_set_b(c: char) -> bool {
    (' '..='~').contains(&c)
}

fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn starts_in_c(bytes: &[u8]) -> bool {
    let run = digit_run(bytes);
    run >= 4 || (run == 2 && bytes.len() == 2)
}

fn worth_switching(run: usize, reaches_end: bool) -> bool {
    run >= 6 || (reaches_end && run >= 4)
}
