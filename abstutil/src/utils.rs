use std::collections::BTreeSet;

/// Joins names into English: "a", "a and b", "a, b, and c".
pub fn plain_list_names(names: BTreeSet<String>) -> String {
    let mut s = String::new();
    let len = names.len();
    for (idx, n) in names.into_iter().enumerate() {
        if idx != 0 {
            if idx == len - 1 {
                if len == 2 {
                    s.push_str(" and ");
                } else {
                    s.push_str(", and ");
                }
            } else {
                s.push_str(", ");
            }
        }
        s.push_str(&n);
    }
    s
}

pub fn prettyprint_usize(x: usize) -> String {
    let num = format!("{}", x);
    let mut result = String::new();
    let mut i = num.len();
    for c in num.chars() {
        result.push(c);
        i -= 1;
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_names() {
        let names = |list: &[&str]| list.iter().map(|x| x.to_string()).collect::<BTreeSet<_>>();
        assert_eq!(plain_list_names(names(&["Folder"])), "Folder");
        assert_eq!(
            plain_list_names(names(&["Point", "Folder"])),
            "Folder and Point"
        );
        assert_eq!(
            plain_list_names(names(&["Point", "Folder", "Document"])),
            "Document, Folder, and Point"
        );
    }

    #[test]
    fn commas() {
        assert_eq!(prettyprint_usize(7), "7");
        assert_eq!(prettyprint_usize(1234), "1,234");
        assert_eq!(prettyprint_usize(1234567), "1,234,567");
    }
}
