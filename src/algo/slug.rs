//! Slug derivation.
//!
//! A slug is `{id:04}_{text}` where `text` is the title with ideographs
//! romanized, letters and digits lowercased and everything else folded into
//! single hyphens. The id prefix makes slugs unique as long as ids are.
//!
//! Romanization is a [`Transliterate`] capability handed in by the caller, so
//! the generator stays pure and tests can use a small fake table.

use pinyin::ToPinyin;

/// Maps a single ideographic character to its canonical romanized reading.
pub trait Transliterate {
    fn romanize(&self, c: char) -> Option<String>;
}

/// Mandarin readings (first reading, tone marks stripped) from the `pinyin` tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pinyin;

impl Transliterate for Pinyin {
    fn romanize(&self, c: char) -> Option<String> {
        c.to_pinyin().map(|p| p.plain().to_string())
    }
}

pub fn generate_slug(translit: &dyn Transliterate, id: i64, title: &str) -> String {
    let mut raw = String::with_capacity(title.len());

    for c in title.chars() {
        if is_ideograph(c) {
            // Ideographs with no known reading contribute nothing.
            if let Some(reading) = translit.romanize(c) {
                push_reading(&mut raw, &reading);
            }
        } else if c.is_alphanumeric() {
            raw.extend(c.to_lowercase());
        } else {
            raw.push('-');
        }
    }

    format!("{:04}_{}", id, collapse_hyphens(&raw))
}

fn push_reading(out: &mut String, reading: &str) {
    for c in reading.chars().flat_map(char::to_lowercase) {
        match c {
            'ü' => out.push('v'),
            c if c.is_ascii_alphanumeric() => out.push(c),
            _ => {}
        }
    }
}

fn collapse_hyphens(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '-' && (out.is_empty() || out.ends_with('-')) {
            continue;
        }
        out.push(c);
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Han script code points (Unicode 15.1), including radicals, iteration marks
/// and the compatibility blocks.
fn is_ideograph(c: char) -> bool {
    matches!(
        c as u32,
        0x2E80..=0x2FDF
            | 0x3005
            | 0x3007
            | 0x3021..=0x3029
            | 0x3038..=0x303B
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xF900..=0xFAFF
            | 0x16FE2..=0x16FE3
            | 0x16FF0..=0x16FF1
            | 0x20000..=0x2A6DF
            | 0x2A700..=0x2EE5F
            | 0x2F800..=0x2FA1F
            | 0x30000..=0x323AF
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeTable;

    fn is_well_formed(slug: &str) -> bool {
        let Some((prefix, text)) = slug.split_once('_') else {
            return false;
        };
        prefix.len() >= 4
            && prefix.chars().all(|c| c.is_ascii_digit())
            && text
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !text.contains("--")
            && !text.starts_with('-')
            && !text.ends_with('-')
    }

    #[test]
    fn latin_title() {
        assert_eq!(generate_slug(&FakeTable::new(), 1, "Two Sum"), "0001_two-sum");
    }

    #[test]
    fn punctuation_collapses_and_trims() {
        let slug = generate_slug(&FakeTable::new(), 42, "  3Sum -- Closest!! ");
        assert_eq!(slug, "0042_3sum-closest");
    }

    #[test]
    fn wide_ids_are_not_truncated() {
        assert_eq!(generate_slug(&FakeTable::new(), 12345, "a"), "12345_a");
    }

    #[test]
    fn ideographs_are_romanized_and_lowercased() {
        let slug = generate_slug(&FakeTable::new(), 7, "两数之和");
        assert_eq!(slug, "0007_liangshuzhihe");
        assert!(is_well_formed(&slug));
    }

    #[test]
    fn mixed_title() {
        let slug = generate_slug(&FakeTable::new(), 3, "LRU 两数, 之和 II");
        assert_eq!(slug, "0003_lru-liangshu-zhihe-ii");
    }

    #[test]
    fn umlaut_readings_stay_ascii() {
        assert_eq!(generate_slug(&FakeTable::new(), 5, "绿"), "0005_lv");
    }

    #[test]
    fn unknown_ideographs_emit_nothing() {
        assert_eq!(generate_slug(&FakeTable::new(), 9, "两龘数"), "0009_liangshu");
    }

    #[test]
    fn empty_token_sequence_leaves_bare_prefix() {
        assert_eq!(generate_slug(&FakeTable::new(), 8, "?!  ..."), "0008_");
    }

    #[test]
    fn same_input_same_slug() {
        let table = FakeTable::new();
        assert_eq!(
            generate_slug(&table, 11, "Merge k Sorted Lists"),
            generate_slug(&table, 11, "Merge k Sorted Lists")
        );
    }

    #[test]
    fn real_pinyin_produces_well_formed_slugs() {
        for title in ["两数之和", "最长回文子串", "接雨水", "中文"] {
            let slug = generate_slug(&Pinyin, 1, title);
            assert!(is_well_formed(&slug), "bad slug {slug}");
            assert!(slug.len() > "0001_".len());
        }
        assert_eq!(generate_slug(&Pinyin, 2, "中文"), "0002_zhongwen");
    }

    #[test]
    fn iteration_marks_and_unreadable_han_emit_nothing() {
        let fake = FakeTable::new();
        assert_eq!(generate_slug(&fake, 1, "a\u{2EBF0}b"), "0001_ab");
        assert_eq!(generate_slug(&fake, 1, "\u{31350}"), "0001_");
        assert_eq!(generate_slug(&fake, 1, "\u{2F00} x"), "0001_x");
        assert_eq!(generate_slug(&fake, 4, "两々数"), "0004_liangshu");
    }

    #[test]
    fn every_han_block_yields_well_formed_slugs() {
        // (first, last) of each Han block
        let blocks: [(u32, u32); 14] = [
            (0x2E80, 0x2FDF),
            (0x3005, 0x3005),
            (0x3007, 0x3007),
            (0x3021, 0x3029),
            (0x3038, 0x303B),
            (0x3400, 0x4DBF),
            (0x4E00, 0x9FFF),
            (0xF900, 0xFAFF),
            (0x16FE2, 0x16FE3),
            (0x16FF0, 0x16FF1),
            (0x20000, 0x2A6DF),
            (0x2A700, 0x2EE5F),
            (0x2F800, 0x2FA1F),
            (0x30000, 0x323AF),
        ];
        let fake = FakeTable::new();
        let tables: [&dyn Transliterate; 2] = [&Pinyin, &fake];
        for (first, last) in blocks {
            let step = ((last - first) / 64).max(1);
            let title: String = (first..=last)
                .step_by(step as usize)
                .chain([last])
                .filter_map(char::from_u32)
                .collect();
            assert!(title.chars().all(is_ideograph), "{first:X}..{last:X}");

            for translit in tables {
                let slug = generate_slug(translit, 12, &title);
                assert!(is_well_formed(&slug), "bad slug {slug} for {first:X}..{last:X}");
            }
        }
    }
}
