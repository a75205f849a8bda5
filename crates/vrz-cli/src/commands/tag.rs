use anyhow::{Context, Result};
use bstr::BString;
use clap::Args;
use vrz_object::ObjectKind;
use vrz_ref::TagSpec;
use vrz_utils::date::{GitDate, Signature};

use super::open_repo;
use super::show_ref::print_refs;

#[derive(Args)]
pub struct TagArgs {
    /// Create an annotated tag object
    #[arg(short = 'a')]
    annotate: bool,

    /// The tag's name
    name: Option<String>,

    /// The object the tag points to
    #[arg(default_value = "HEAD")]
    object: String,
}

pub fn run(args: &TagArgs) -> Result<()> {
    let repo = open_repo()?;

    let Some(name) = &args.name else {
        let tags = repo.refs().list(Some("tags"))?;
        print_refs(&tags, false, "");
        return Ok(());
    };

    let oid = repo
        .refs()
        .find(repo.odb(), &args.object)?
        .with_context(|| format!("not a valid object name: {}", args.object))?;

    if args.annotate {
        let (name_cfg, email) = repo.config().user_identity()?;
        let tagger = Signature {
            name: name_cfg,
            email,
            date: GitDate::now(),
        };
        repo.refs().create_annotated_tag(
            repo.odb(),
            name,
            oid,
            ObjectKind::Commit,
            TagSpec {
                tagger,
                message: BString::from("A tag generated by vrz, which does not support custom annotated tag messages.\n"),
            },
        )?;
    } else {
        repo.refs().create_lightweight_tag(name, &oid)?;
    }

    Ok(())
}
