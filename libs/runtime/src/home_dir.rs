use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// Resolve the application home directory into an absolute path.
///
/// - `None` or blank: `$HOME/<default_subdir>`
/// - `~` / `~/...`: expanded against the user's home
/// - relative: joined onto the current directory
pub fn resolve_home_dir(raw: Option<String>, default_subdir: &str, create: bool) -> Result<PathBuf> {
    let raw = raw.filter(|s| !s.trim().is_empty());

    let path = match raw.as_deref() {
        None => user_home()?.join(default_subdir),
        Some("~") => user_home()?,
        Some(s) if s.starts_with("~/") || s.starts_with("~\\") => user_home()?.join(&s[2..]),
        Some(s) if s.starts_with('~') => bail!("unsupported home_dir form: {s}"),
        Some(s) => {
            let p = PathBuf::from(s);
            if p.is_absolute() {
                p
            } else {
                std::env::current_dir()
                    .context("cannot read current directory")?
                    .join(p)
            }
        }
    };

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("cannot create home_dir {}", path.display()))?;
    }
    Ok(path)
}

fn user_home() -> Result<PathBuf> {
    dirs::home_dir().context("user home directory is not known on this platform")
}
