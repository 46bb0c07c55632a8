use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use tracing::debug;
use walkdir::WalkDir;

use crate::compose::{self, Alphabetize, FileMatch, SortPolicy};

#[derive(Debug, Args)]
pub struct Sort {
    /// Path to a compose file, or a directory to scan
    pub input: String,

    /// Output file for the sorted YAML; defaults to overwriting the input
    #[clap(short, long)]
    pub output: Option<String>,

    /// Suffix appended to each output file name in directory mode, e.g. `.sorted`
    #[clap(short, long)]
    pub name: Option<String>,

    /// Service fields alphabetized when their value is a list
    #[clap(long, value_enum, default_value_t)]
    pub alphabetize: Alphabetize,

    /// File names processed when scanning a directory
    #[clap(long, value_enum, default_value_t)]
    pub files: FileMatch,
}

impl Sort {
    pub fn run(self) -> Result<()> {
        let changed = self.process()?;
        println!("Number of files changed: {}", changed);
        Ok(())
    }

    fn process(&self) -> Result<usize> {
        let policy = SortPolicy::new(self.alphabetize);
        let input = Path::new(&self.input);
        if input.is_dir() {
            self.process_dir(input, &policy)
        } else if input.is_file() {
            let output = self
                .output
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or_else(|| input.to_path_buf());
            let changed = compose::sort_file(input, &output, &policy)?;
            Ok(usize::from(changed))
        } else {
            eprintln!("Error: {} is not a valid file or directory.", self.input);
            Ok(0)
        }
    }

    fn process_dir(&self, dir: &Path, policy: &SortPolicy) -> Result<usize> {
        let suffix = self.name.as_deref().unwrap_or("");
        // Snapshot the walk up front so files written below are not revisited.
        let entries: Vec<_> = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .collect();

        let mut changed = 0;
        for entry in entries {
            let file_name = entry.file_name().to_string_lossy();
            if !self.files.matches(&file_name) {
                debug!(path = %entry.path().display(), "Skipped");
                continue;
            }
            let mut out_name = entry.file_name().to_os_string();
            out_name.push(suffix);
            let output = entry.path().with_file_name(&out_name);
            if compose::sort_file(entry.path(), &output, policy)? {
                println!("{}: changed.", entry.path().display());
                changed += 1;
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const COMPOSE: &str = r#"
services:
  web:
    ports:
      - "8081:8081"
      - "8080:8080"
    image: nginx
version: '3'
"#;

    fn sort(input: &Path) -> Sort {
        Sort {
            input: input.to_string_lossy().into_owned(),
            output: None,
            name: None,
            alphabetize: Alphabetize::Basic,
            files: FileMatch::Compose,
        }
    }

    #[test]
    fn test_single_file_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("docker-compose.yml");
        fs::write(&path, COMPOSE).unwrap();

        assert_eq!(sort(&path).process().unwrap(), 1);
        assert!(fs::read_to_string(&path).unwrap().starts_with("version:"));
    }

    #[test]
    fn test_single_file_with_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("docker-compose.yml");
        let output = dir.path().join("sorted.yml");
        fs::write(&input, COMPOSE).unwrap();

        let mut cmd = sort(&input);
        cmd.output = Some(output.to_string_lossy().into_owned());
        assert_eq!(cmd.process().unwrap(), 1);
        assert_eq!(fs::read_to_string(&input).unwrap(), COMPOSE);
        assert!(fs::read_to_string(&output).unwrap().starts_with("version:"));
    }

    #[test]
    fn test_directory_walk_with_suffix() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("docker-compose.yml"), COMPOSE).unwrap();
        fs::write(dir.path().join("docker-compose.override.yml"), COMPOSE).unwrap();
        fs::write(dir.path().join("readme.txt"), "not yaml").unwrap();

        let mut cmd = sort(dir.path());
        cmd.name = Some(".sorted".to_string());
        assert_eq!(cmd.process().unwrap(), 2);

        for name in ["docker-compose.yml.sorted", "docker-compose.override.yml.sorted"] {
            let text = fs::read_to_string(dir.path().join(name)).unwrap();
            assert!(text.starts_with("version:"));
        }
        // originals and the stray file untouched
        assert_eq!(
            fs::read_to_string(dir.path().join("docker-compose.yml")).unwrap(),
            COMPOSE
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("readme.txt")).unwrap(),
            "not yaml"
        );
    }

    #[test]
    fn test_directory_walk_recurses() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("deploy").join("staging");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("docker-compose.yml"), COMPOSE).unwrap();

        assert_eq!(sort(dir.path()).process().unwrap(), 1);
        let text = fs::read_to_string(nested.join("docker-compose.yml")).unwrap();
        assert!(text.starts_with("version:"));
    }

    #[test]
    fn test_directory_walk_any_yaml() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("app.yaml"), COMPOSE).unwrap();
        fs::write(dir.path().join("docker-compose.yml"), COMPOSE).unwrap();

        let mut cmd = sort(dir.path());
        cmd.files = FileMatch::AnyYaml;
        assert_eq!(cmd.process().unwrap(), 2);

        assert_eq!(sort(dir.path()).process().unwrap(), 1);
    }

    #[test]
    fn test_non_mapping_root_not_counted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("docker-compose.yml"), "- a\n- b\n").unwrap();
        fs::write(dir.path().join("docker-compose.override.yml"), COMPOSE).unwrap();

        assert_eq!(sort(dir.path()).process().unwrap(), 1);
    }

    #[test]
    fn test_missing_path_processes_nothing() {
        let missing = Path::new("does/not/exist/docker-compose.yml");
        assert_eq!(sort(missing).process().unwrap(), 0);
    }

    #[test]
    fn test_malformed_file_aborts_walk() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("docker-compose.yml"), "services: [\n").unwrap();

        assert!(sort(dir.path()).process().is_err());
    }
}
