use std::{env, error::Error, time};

use git2::Repository;

fn get_current_commit_hash() -> Result<String, Box<dyn Error>> {
    let repo_dir = env::var("CARGO_MANIFEST_DIR")?;
    let repo = Repository::open(repo_dir)?;
    let hash = repo.head()?.peel_to_commit()?.id().to_string();
    Ok(hash)
}

fn main() {
    if let Ok(hash) = get_current_commit_hash() {
        println!("cargo::rustc-env=BUILD_COMMIT={}", hash);
    }
    let built_at = time::SystemTime::now()
        .duration_since(time::UNIX_EPOCH)
        .map(|x| x.as_secs())
        .unwrap_or_default();
    println!("cargo::rustc-env=BUILD_TIME={}", built_at);
    println!("cargo::rerun-if-changed=.git/HEAD");
}
