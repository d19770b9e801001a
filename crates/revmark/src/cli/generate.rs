//! CLI handler for generate command

use std::path::{Path, PathBuf};

use revmark_core::config::Config;
use revmark_core::engine::{EngineOptions, Generator};
use revmark_core::file_name;

use crate::cli::util::read_inputs;

/// Arguments of `revmark generate`
pub struct GenerateArgs {
    pub original: PathBuf,
    pub edited: PathBuf,
    pub output: Option<PathBuf>,
    pub name: Option<String>,
    pub author: Option<String>,
    pub max_lcs_cells: Option<usize>,
    pub force: bool,
}

/// Handle the generate command
/// Returns true on success, false on error
pub fn handle_generate(config: &Config, args: GenerateArgs) -> bool {
    let Some((original, edited)) = read_inputs(config, &args.original, &args.edited) else {
        return false;
    };

    let destination = resolve_output(config, args.output, args.name.as_deref());
    if destination.exists() && !args.force {
        eprintln!(
            "✗ Destination file '{}' already exists (use --force to overwrite)",
            destination.display()
        );
        return false;
    }

    let generator = Generator::new(engine_options(config, args.author, args.max_lcs_cells));
    let generated = match generator.generate(&original, &edited) {
        Ok(generated) => generated,
        Err(e) => {
            eprintln!("✗ {}", e);
            return false;
        }
    };

    if let Err(e) = std::fs::write(&destination, &generated.bytes) {
        eprintln!("✗ Could not write '{}': {}", destination.display(), e);
        return false;
    }

    println!("✓ Wrote {}", destination.display());
    println!("  {}", generated.summary);
    if generated.summary.is_identical() {
        println!("  (no differences found)");
    }
    true
}

/// Flags take precedence over config values.
fn engine_options(
    config: &Config,
    author: Option<String>,
    max_lcs_cells: Option<usize>,
) -> EngineOptions {
    let mut options = config.engine_options();
    if let Some(author) = author {
        options.author = author;
    }
    if let Some(cells) = max_lcs_cells {
        options.max_lcs_cells = cells;
    }
    options
}

/// `--output` wins; otherwise a sanitized name in the current directory.
fn resolve_output(config: &Config, output: Option<PathBuf>, name: Option<&str>) -> PathBuf {
    if let Some(path) = output {
        return path;
    }
    let name = name.unwrap_or(&config.default_file_name);
    Path::new(".").join(file_name::sanitize(Some(name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_flag_wins() {
        let config = Config::default();
        let path = resolve_output(&config, Some(PathBuf::from("out/x.docx")), Some("ignored"));
        assert_eq!(path, PathBuf::from("out/x.docx"));
    }

    #[test]
    fn test_name_is_sanitized() {
        let config = Config::default();
        assert_eq!(
            resolve_output(&config, None, Some("chapter-3")),
            Path::new(".").join("chapter-3.docx")
        );
        assert_eq!(
            resolve_output(&config, None, Some("../escape")),
            Path::new(".").join("edited-manuscript.docx")
        );
    }

    #[test]
    fn test_config_default_name() {
        let config = Config {
            default_file_name: "review".to_string(),
            ..Default::default()
        };
        assert_eq!(
            resolve_output(&config, None, None),
            Path::new(".").join("review.docx")
        );
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            author: "Config Author".to_string(),
            ..Default::default()
        };
        let options = engine_options(&config, Some("Flag Author".to_string()), Some(64));
        assert_eq!(options.author, "Flag Author");
        assert_eq!(options.max_lcs_cells, 64);

        let options = engine_options(&config, None, None);
        assert_eq!(options.author, "Config Author");
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("original.txt");
        let edited = dir.path().join("edited.txt");
        let output = dir.path().join("out.docx");
        std::fs::write(&original, "Hello world").unwrap();
        std::fs::write(&edited, "Hello there").unwrap();

        let args = GenerateArgs {
            original: original.clone(),
            edited: edited.clone(),
            output: Some(output.clone()),
            name: None,
            author: None,
            max_lcs_cells: None,
            force: false,
        };
        assert!(handle_generate(&Config::default(), args));
        assert_eq!(&std::fs::read(&output).unwrap()[..2], b"PK");

        // Refuses to overwrite without --force
        let args = GenerateArgs {
            original,
            edited,
            output: Some(output),
            name: None,
            author: None,
            max_lcs_cells: None,
            force: false,
        };
        assert!(!handle_generate(&Config::default(), args));
    }
}
