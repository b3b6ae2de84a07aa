//! `package.json` scripts rewrite.

use std::path::Path;
use tracing::debug;

use crate::config::{ManifestRewrite, ScriptMap};
use crate::error::{CnaError, CnaResult};
use crate::process::{CommandRunner, Invocation};

pub const MANIFEST_FILE: &str = "package.json";

/// Replace the `scripts` section of the project manifest with `scripts`.
///
/// Existing entries are dropped, not merged.
pub async fn rewrite_scripts(
    runner: &dyn CommandRunner,
    strategy: ManifestRewrite,
    project_dir: &Path,
    scripts: &ScriptMap,
) -> CnaResult<()> {
    match strategy {
        ManifestRewrite::Native => rewrite_native(project_dir, scripts).await,
        ManifestRewrite::JsonCli => rewrite_with_json_cli(runner, project_dir, scripts).await,
    }
}

/// Patch the manifest in-process. Key order of the rest of the file is kept.
async fn rewrite_native(project_dir: &Path, scripts: &ScriptMap) -> CnaResult<()> {
    let path = project_dir.join(MANIFEST_FILE);
    if !path.exists() {
        return Err(CnaError::ManifestNotFound(path));
    }

    let content = tokio::fs::read_to_string(&path).await?;
    let patched = replace_scripts(&path, &content, scripts)?;

    tokio::fs::write(&path, patched).await?;
    debug!(path = %path.display(), scripts = scripts.len(), "Rewrote manifest scripts");
    Ok(())
}

/// Return the manifest text read from `path` with `scripts` replaced.
pub fn replace_scripts(path: &Path, content: &str, scripts: &ScriptMap) -> CnaResult<String> {
    let mut manifest: serde_json::Value = serde_json::from_str(content)?;

    let object = manifest
        .as_object_mut()
        .ok_or_else(|| CnaError::InvalidManifest(path.to_path_buf()))?;
    object.insert("scripts".to_string(), scripts.to_json());

    let mut patched = serde_json::to_string_pretty(&manifest)?;
    patched.push('\n');
    Ok(patched)
}

/// `json -I -f package.json -e 'this.scripts=...'`
async fn rewrite_with_json_cli(
    runner: &dyn CommandRunner,
    project_dir: &Path,
    scripts: &ScriptMap,
) -> CnaResult<()> {
    let expression = format!("this.scripts={}", serde_json::to_string(&scripts.to_json())?);
    let invocation = Invocation::new("json", project_dir)
        .args(["-I", "-f", MANIFEST_FILE, "-e"])
        .arg(expression);

    let output = runner.run(&invocation).await?;
    if !output.success() {
        return Err(CnaError::ManifestRewrite(output.stderr));
    }
    Ok(())
}
