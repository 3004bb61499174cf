use crate::{
    contents::{package_display_name, ContentsRecord},
    error::ContentsError,
};

use std::{borrow::Borrow, cmp::Reverse, collections::HashMap, fmt::Display};

/// How a package field listing several packages is counted
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CountMode {
    /// The whole field is one key, `a/x,b/y` counts once as itself
    Combined,
    /// Every listed package gets its own count
    PerPackage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCount {
    pub package: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub rank: usize,
    pub display_name: String,
    pub count: usize,
}

impl Display for RankedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} -- {}", self.rank, self.display_name, self.count)
    }
}

/// Running per-package file counts
struct Tally {
    mode: CountMode,
    // package => (count, first seen)
    counts: HashMap<String, (usize, usize)>,
}

impl Tally {
    fn new(mode: CountMode) -> Self {
        Tally {
            mode,
            counts: HashMap::new(),
        }
    }

    fn add(&mut self, record: &ContentsRecord) {
        match self.mode {
            CountMode::Combined => self.bump(&record.package_ref),
            CountMode::PerPackage => {
                for package in record.packages() {
                    self.bump(package);
                }
            }
        }
    }

    fn bump(&mut self, package: &str) {
        let seen = self.counts.len();
        match self.counts.get_mut(package) {
            Some((count, _)) => *count += 1,
            None => {
                self.counts.insert(package.to_owned(), (1, seen));
            }
        }
    }

    /// Packages by descending count. Equal counts keep the order they were first seen in.
    fn ranked(self) -> Vec<PackageCount> {
        let mut entries: Vec<(String, usize, usize)> = self
            .counts
            .into_iter()
            .map(|(package, (count, seen))| (package, count, seen))
            .collect();
        entries.sort_by_key(|(_, count, seen)| (Reverse(*count), *seen));
        entries
            .into_iter()
            .map(|(package, count, _)| PackageCount { package, count })
            .collect()
    }
}

/// Count packages over a record sequence, most files first
pub fn top_packages<R: Borrow<ContentsRecord>>(
    records: impl IntoIterator<Item = R>,
    mode: CountMode,
) -> Vec<PackageCount> {
    let mut tally = Tally::new(mode);
    for record in records {
        tally.add(record.borrow());
    }
    tally.ranked()
}

/// First `n` packages with rank and short display name
pub fn rank(ranked: &[PackageCount], n: usize) -> Result<Vec<RankedEntry>, ContentsError> {
    if n < 1 {
        return Err(ContentsError::InvalidArgument(format!(
            "cannot list top {} packages, need at least 1",
            n
        )));
    }
    Ok(ranked
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, p)| RankedEntry {
            rank: i + 1,
            display_name: package_display_name(&p.package).to_owned(),
            count: p.count,
        })
        .collect())
}

/// One `rank: name -- count` line per package
pub fn render(ranked: &[PackageCount], n: usize) -> Result<String, ContentsError> {
    let mut out = String::new();
    for entry in rank(ranked, n)? {
        out.push_str(&entry.to_string());
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;

    fn records(counts: &[(&str, usize)]) -> Vec<ContentsRecord> {
        let mut res = Vec::new();
        for (package, count) in counts {
            for i in 0..*count {
                res.push(ContentsRecord {
                    file_path: format!("/usr/share/{}/{}", package, i),
                    package_ref: package.to_string(),
                });
            }
        }
        res
    }

    #[test]
    fn counts_and_order() {
        let recs = records(&[("misc/D", 1), ("admin/B", 3), ("net/A", 5), ("libs/C", 3)]);
        let top = top_packages(&recs, CountMode::Combined);
        let got: Vec<(&str, usize)> = top.iter().map(|p| (p.package.as_str(), p.count)).collect();
        assert_eq!(
            got,
            vec![("net/A", 5), ("admin/B", 3), ("libs/C", 3), ("misc/D", 1)]
        );
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let mut recs = records(&[("c", 2), ("a", 2), ("b", 2)]);
        // Interleaving doesn't matter, only the first occurrence
        recs.rotate_left(1);
        let top = top_packages(&recs, CountMode::Combined);
        let names: Vec<&str> = top.iter().map(|p| p.package.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn idempotent() {
        let recs = records(&[("x/A", 5), ("x/B", 3), ("y/C", 3), ("z/D", 1)]);
        assert_eq!(
            top_packages(&recs, CountMode::Combined),
            top_packages(&recs, CountMode::Combined)
        );
    }

    #[test]
    fn render_top_two() {
        let recs = records(&[("net/A", 5), ("admin/B", 3), ("libs/C", 3), ("misc/D", 1)]);
        let top = top_packages(&recs, CountMode::Combined);
        assert_eq!(render(&top, 2).unwrap(), "1: A -- 5\n2: B -- 3\n");
    }

    #[test]
    fn render_more_than_available() {
        let recs = records(&[("a/x", 2), ("b/y", 1)]);
        let top = top_packages(&recs, CountMode::Combined);
        assert_eq!(render(&top, 10).unwrap().lines().count(), 2);
        assert_eq!(render(&[], 10).unwrap(), "");
    }

    #[test]
    fn render_zero() {
        assert!(matches!(
            render(&[], 0),
            Err(ContentsError::InvalidArgument(_))
        ));
    }

    #[test]
    fn display_name_is_stripped_but_key_is_not() {
        // Same short name in two sections stays two entries
        let recs = records(&[("main/foo", 2), ("contrib/foo", 1)]);
        let top = top_packages(&recs, CountMode::Combined);
        assert_eq!(top.len(), 2);
        assert_eq!(render(&top, 5).unwrap(), "1: foo -- 2\n2: foo -- 1\n");
    }

    #[test]
    fn multi_package_modes() {
        let mut recs = records(&[("doc/a,doc/b", 2), ("doc/a", 1)]);
        recs.push(ContentsRecord {
            file_path: "usr/share/x".to_owned(),
            package_ref: "doc/b, doc/c".to_owned(),
        });

        let combined = top_packages(&recs, CountMode::Combined);
        assert_eq!(combined.len(), 3);
        assert_eq!(combined[0].package, "doc/a,doc/b");
        assert_eq!(combined[0].count, 2);

        let split = top_packages(&recs, CountMode::PerPackage);
        let got: Vec<(&str, usize)> =
            split.iter().map(|p| (p.package.as_str(), p.count)).collect();
        assert_eq!(got, vec![("doc/a", 3), ("doc/b", 3), ("doc/c", 1)]);
    }
}
