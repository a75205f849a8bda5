use anyhow::Result;
use bstr::ByteSlice;
use clap::Args;
use vrz_object::FileMode;

use super::open_repo;

#[derive(Args)]
pub struct LsFilesArgs {
    /// Show everything
    #[arg(long, short)]
    verbose: bool,
}

pub fn run(args: &LsFilesArgs) -> Result<()> {
    let mut repo = open_repo()?;
    let index = repo.index()?;

    if args.verbose {
        println!("Index File Format v2, containing {} entries", index.len());
    }

    for entry in index.iter() {
        println!("{}", entry.path.to_str_lossy());
        if args.verbose {
            let type_name = match entry.mode {
                FileMode::Regular | FileMode::Executable => "regular_file",
                FileMode::Symlink => "symlink",
                FileMode::Gitlink => "verlink",
                FileMode::Tree | FileMode::Unknown(_) => "unknown",
            };
            println!("  {} with perms: {:o}", type_name, entry.mode.raw() & 0o777);
            println!("  on blob: {}", entry.oid.to_hex());
            println!(
                "  created: {}, modified: {}",
                chrono::DateTime::from_timestamp(entry.stat.ctime_secs as i64, entry.stat.ctime_nsecs)
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default(),
                chrono::DateTime::from_timestamp(entry.stat.mtime_secs as i64, entry.stat.mtime_nsecs)
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default(),
            );
            println!("  device: {}, inode: {}", entry.stat.dev, entry.stat.ino);
            println!("  user: {} group: {}", entry.stat.uid, entry.stat.gid);
            println!("  flags: stage={} assume_valid={}", entry.stage, entry.assume_valid);
        }
    }

    Ok(())
}
