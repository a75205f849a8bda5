//! `log`: DFS over commits from a starting sha, following `parent`s, with
//! a visited set so merges don't get walked twice. Emits graphviz edges,
//! matching the reference workspace's `log_graphviz`.

use std::collections::HashSet;

use bstr::ByteSlice;
use vrz_hash::ObjectId;
use vrz_object::Object;
use vrz_odb::ObjectDatabase;

use crate::error::RepoError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub oid: ObjectId,
    pub summary: String,
}

/// DFS from `start`, returning one graphviz line per visited commit
/// (`c_<sha> [label="<short>: <summary>"]`) followed by one edge line per
/// parent link (`c_<sha> -> c_<parent>;`).
pub fn log(odb: &ObjectDatabase, start: ObjectId) -> Result<Vec<String>, RepoError> {
    let mut seen = HashSet::new();
    let mut lines = Vec::new();
    visit(odb, start, &mut seen, &mut lines)?;
    Ok(lines)
}

/// The entries visited, in DFS order, without the graphviz formatting —
/// what `vrz-cli`'s plain-text `log` wants.
pub fn log_entries(odb: &ObjectDatabase, start: ObjectId) -> Result<Vec<LogEntry>, RepoError> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    collect(odb, start, &mut seen, &mut entries)?;
    Ok(entries)
}

fn visit(
    odb: &ObjectDatabase,
    oid: ObjectId,
    seen: &mut HashSet<ObjectId>,
    lines: &mut Vec<String>,
) -> Result<(), RepoError> {
    if !seen.insert(oid) {
        return Ok(());
    }

    let Object::Commit(commit) = odb.read(&oid)? else {
        return Ok(());
    };

    let summary = summary_line(&commit.message.to_str_lossy().into_owned());
    lines.push(format!("  c_{} [label=\"{}: {}\"]", oid.to_hex(), &oid.to_hex()[..7], summary));

    for parent in &commit.parents {
        lines.push(format!("  c_{} -> c_{};", oid.to_hex(), parent.to_hex()));
        visit(odb, *parent, seen, lines)?;
    }

    Ok(())
}

fn collect(
    odb: &ObjectDatabase,
    oid: ObjectId,
    seen: &mut HashSet<ObjectId>,
    entries: &mut Vec<LogEntry>,
) -> Result<(), RepoError> {
    if !seen.insert(oid) {
        return Ok(());
    }
    let Object::Commit(commit) = odb.read(&oid)? else {
        return Ok(());
    };
    entries.push(LogEntry {
        oid,
        summary: summary_line(&commit.message.to_str_lossy().into_owned()),
    });
    for parent in &commit.parents {
        collect(odb, *parent, seen, entries)?;
    }
    Ok(())
}

fn summary_line(message: &str) -> String {
    let first = message.trim().lines().next().unwrap_or("");
    first.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrz_object::{Commit, ObjectKind};
    use vrz_utils::date::{GitDate, Signature};

    fn sig() -> Signature {
        Signature {
            name: "A".into(),
            email: "a@b.com".into(),
            date: GitDate::new(1, 0),
        }
    }

    #[test]
    fn dfs_visits_each_commit_once_through_a_merge() {
        let dir = tempfile::tempdir().unwrap();
        let odb = ObjectDatabase::open(dir.path());

        let tree_oid = odb
            .hash(ObjectKind::Tree, &vrz_object::Tree::new().serialize_content(), true)
            .unwrap();

        let mk_commit = |parents: Vec<ObjectId>, msg: &str| {
            let c = Commit {
                tree: tree_oid,
                parents,
                author: sig(),
                committer: sig(),
                extra: vec![],
                message: msg.into(),
            };
            odb.hash(ObjectKind::Commit, &c.serialize_content(), true).unwrap()
        };

        let root = mk_commit(vec![], "root\n");
        let left = mk_commit(vec![root], "left\n");
        let right = mk_commit(vec![root], "right\n");
        let merge = mk_commit(vec![left, right], "merge\n");

        let entries = log_entries(&odb, merge).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].oid, merge);
        assert!(entries.iter().any(|e| e.oid == root));
    }
}
