//! 碱基符号分类：判定一个原始字符是否为核苷酸碱基、是否为未知碱基（N），
//! 以及两个碱基在大小写 / 同义（U≡T）规则下是否相同。
//!
//! 距离引擎从不直接解释原始字符，所有符号判定都经过本模块。

/// 判断 `c` 是否编码一个核苷酸碱基（含 RNA 的 U 与通配符 N，大小写均可）。
#[inline]
pub fn is_base(c: u8) -> bool {
    matches!(c.to_ascii_uppercase(), b'A' | b'C' | b'G' | b'T' | b'U' | b'N')
}

/// 判断 `c` 是否为未知 / 通配碱基（`N` 或 `n`）。
#[inline]
pub fn is_unknown_base(c: u8) -> bool {
    c.to_ascii_uppercase() == b'N'
}

/// 规范形式：统一大写，并把 U 折叠为 T（尿嘧啶按胸腺嘧啶对齐）。
#[inline]
pub fn canonical(c: u8) -> u8 {
    let up = c.to_ascii_uppercase();
    if up == b'U' {
        b'T'
    } else {
        up
    }
}

/// 判断两个碱基符号是否表示同一碱基（大小写不敏感，U≡T）。
#[inline]
pub fn is_same_base(a: u8, b: u8) -> bool {
    canonical(a) == canonical(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bases_upper_and_lower() {
        for &c in b"ACGTUNacgtun" {
            assert!(is_base(c), "{} should be a base", c as char);
        }
    }

    #[test]
    fn non_base_symbols() {
        for &c in b"\n\r >0129;-_XqZ" {
            assert!(!is_base(c), "{:?} should not be a base", c as char);
        }
    }

    #[test]
    fn unknown_base_is_n_only() {
        assert!(is_unknown_base(b'N'));
        assert!(is_unknown_base(b'n'));
        assert!(!is_unknown_base(b'A'));
        assert!(!is_unknown_base(b'U'));
    }

    #[test]
    fn same_base_case_insensitive() {
        assert!(is_same_base(b'a', b'A'));
        assert!(is_same_base(b'g', b'G'));
        assert!(!is_same_base(b'A', b'C'));
    }

    #[test]
    fn uracil_aligns_as_thymine() {
        assert!(is_same_base(b'U', b'T'));
        assert!(is_same_base(b'u', b't'));
        assert_eq!(canonical(b'u'), b'T');
    }
}
