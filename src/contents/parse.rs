/// Parse Contents lines
use nom::{
    bytes::complete::{tag, take_till1},
    character::complete::space0,
    combinator::{eof, map},
    multi::separated_list1,
    sequence::{delimited, terminated},
    IResult,
};

/// Split a line into `(path, package)` on its last run of whitespace.
///
/// Both halves are trimmed. Returns `None` if the line has no such whitespace.
pub fn split_contents_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    let delim = line.rfind(char::is_whitespace)?;
    let (path, package) = line.split_at(delim);
    Some((path.trim(), package.trim()))
}

/// Split a package field like `admin/foo,net/bar` into its members.
///
/// A field without commas comes back as a single member.
pub fn split_package_list(i: &str) -> Option<Vec<&str>> {
    match package_list(i.trim()) {
        Ok((_, packages)) => Some(packages),
        Err(_) => None,
    }
}

fn package_list(i: &str) -> IResult<&str, Vec<&str>> {
    terminated(separated_list1(package_separator, package), eof)(i)
}

fn package_separator(i: &str) -> IResult<&str, ()> {
    map(delimited(space0, tag(","), space0), |_| ())(i)
}

fn package(i: &str) -> IResult<&str, &str> {
    map(take_till1(|c: char| c == ','), str::trim_end)(i)
}

/// Last path segment of a package reference, `admin/foo` => `foo`
pub fn package_display_name(package: &str) -> &str {
    package.rsplit('/').next().unwrap_or(package)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_contents_line() {
        let tests = vec![
            ("/usr/bin/foo    admin/bar\n", ("/usr/bin/foo", "admin/bar")),
            ("simple/path sec/pkg1", ("simple/path", "sec/pkg1")),
            ("usr/share/doc/a b/c.txt\tdoc/pkg", ("usr/share/doc/a b/c.txt", "doc/pkg")),
            ("  padded/path   sec/pkg  \r\n", ("padded/path", "sec/pkg")),
            ("path sec/pkg1,sec2/pkg2", ("path", "sec/pkg1,sec2/pkg2")),
            ("/a/1 pkgX", ("/a/1", "pkgX")),
        ];
        for (t, r) in tests {
            assert_eq!(split_contents_line(t), Some(r));
        }
    }

    #[test]
    fn test_contents_line_without_delimiter() {
        for t in ["nodelimiterhere", "", "   ", "trailing   \n"] {
            assert_eq!(split_contents_line(t), None);
        }
    }

    #[test]
    fn test_package_list() {
        let tests = vec![
            ("sec/pkg1", vec!["sec/pkg1"]),
            ("sec/pkg1,sec2/pkg2", vec!["sec/pkg1", "sec2/pkg2"]),
            ("sec/pkg1, sec2/pkg2 ,sec3/pkg3", vec!["sec/pkg1", "sec2/pkg2", "sec3/pkg3"]),
            ("pkgX", vec!["pkgX"]),
        ];
        for (t, r) in tests {
            assert_eq!(split_package_list(t), Some(r));
        }
        assert_eq!(split_package_list(""), None);
        assert_eq!(split_package_list("sec/pkg1,"), None);
        assert_eq!(split_package_list(",sec/pkg1"), None);
    }

    #[test]
    fn test_display_name() {
        let tests = vec![
            ("admin/bar", "bar"),
            ("non-free/games/foo", "foo"),
            ("pkgX", "pkgX"),
            ("sec/a,sec/b", "b"),
        ];
        for (t, r) in tests {
            assert_eq!(package_display_name(t), r);
        }
    }
}
