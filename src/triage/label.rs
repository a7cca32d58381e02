use anyhow::Result;
use tracing::debug;

use crate::{
    events::{PullRequest, Repository},
    github::{ChangedFile, GitHubClient},
};

/// Which label the changed-file set earns, if any: at least one path ending
/// in `.md` (literal suffix, case-sensitive) earns `label`.
fn decide_label<'a>(files: &[ChangedFile], label: &'a str) -> Option<&'a str> {
    files
        .iter()
        .any(|file| file.filename.ends_with(".md"))
        .then_some(label)
}

/// Labels the pull request when it touches markdown files. The label set is
/// replaced wholesale, so re-running converges on the same state.
pub(crate) async fn apply(
    client: &GitHubClient,
    repo: &Repository,
    pull: &PullRequest,
    label: &str,
) -> Result<()> {
    let files = client
        .list_changed_files(&repo.owner.login, &repo.name, pull.number)
        .await?;
    debug!("{} changed file(s) in {}", files.len(), pull);

    match decide_label(&files, label) {
        Some(label) => {
            client
                .set_labels(
                    &repo.owner.login,
                    &repo.name,
                    pull.number,
                    &[label.to_owned()],
                )
                .await
        }
        None => {
            debug!("no markdown changes, leaving labels untouched");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(paths: &[&str]) -> Vec<ChangedFile> {
        paths
            .iter()
            .map(|path| ChangedFile {
                filename: path.to_string(),
            })
            .collect()
    }

    #[test]
    fn one_markdown_file_is_enough() {
        let files = files(&["src/lib.rs", "README.md", "Cargo.toml"]);
        assert_eq!(decide_label(&files, "documentation"), Some("documentation"));
    }

    #[test]
    fn no_markdown_means_no_label() {
        let files = files(&["src/lib.rs", "Cargo.toml"]);
        assert_eq!(decide_label(&files, "documentation"), None);
    }

    #[test]
    fn an_empty_change_set_means_no_label() {
        assert_eq!(decide_label(&[], "documentation"), None);
    }

    #[test]
    fn the_suffix_match_is_case_sensitive() {
        let files = files(&["docs/setup.MD"]);
        assert_eq!(decide_label(&files, "documentation"), None);
    }

    #[test]
    fn the_suffix_has_to_close_the_path() {
        let files = files(&["README.md.orig", "guide.mdx"]);
        assert_eq!(decide_label(&files, "documentation"), None);
    }

    #[test]
    fn nested_markdown_counts() {
        let files = files(&["docs/book/chapter-1.md"]);
        assert_eq!(decide_label(&files, "docs"), Some("docs"));
    }
}
