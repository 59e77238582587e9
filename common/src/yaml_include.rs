use std::fs;
use std::path::{Path, PathBuf};
use yaml_rust2::{EmitError, ScanError, Yaml, YamlEmitter, YamlLoader};

#[derive(Debug, thiserror::Error)]
pub enum YamlIncludeError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse yaml: {source}")]
    Scan {
        #[from]
        source: ScanError,
    },

    #[error("failed to emit merged yaml: {source}")]
    Emit {
        #[from]
        source: EmitError,
    },

    #[error("{path} contains no yaml document")]
    Empty { path: PathBuf },
}

/// Resolve `!include <relative-path>` lines recursively and merge the result
/// into a single document. Keys in the including file win over included ones.
pub fn load_yaml_with_includes(path: &Path) -> Result<String, YamlIncludeError> {
    let merged = process_includes_recursive(&path.to_path_buf())?;

    let mut out = String::new();
    YamlEmitter::new(&mut out).dump(&merged)?;
    Ok(out)
}

fn process_includes_recursive(path: &PathBuf) -> Result<Yaml, YamlIncludeError> {
    let contents = fs::read_to_string(path).map_err(|source| YamlIncludeError::Io {
        path: path.clone(),
        source,
    })?;
    let base_path = path.parent().unwrap_or(Path::new(""));

    let (includes, rest): (Vec<&str>, Vec<&str>) = contents
        .lines()
        .partition(|&line| line.trim().starts_with("!include"));

    let mut merged_includes: Option<Yaml> = None;
    for line in includes {
        let include_path = line.trim().strip_prefix("!include").unwrap().trim();
        let included = process_includes_recursive(&base_path.join(include_path))?;
        merged_includes = Some(match merged_includes {
            Some(acc) => merge_yaml(&acc, &included),
            None => included,
        });
    }

    let rest_yamls = YamlLoader::load_from_str(&rest.join("\n"))?;
    let merged_rest = rest_yamls
        .into_iter()
        .reduce(|acc: Yaml, doc: Yaml| merge_yaml(&doc, &acc))
        .ok_or_else(|| YamlIncludeError::Empty { path: path.clone() })?;

    match merged_includes {
        Some(merged) => Ok(merge_yaml(&merged, &merged_rest)),
        None => Ok(merged_rest),
    }
}

fn merge_yaml(base: &Yaml, override_yaml: &Yaml) -> Yaml {
    match (base, override_yaml) {
        (Yaml::Hash(base_hash), Yaml::Hash(override_hash)) => {
            let mut result = base_hash.clone();
            for (key, value) in override_hash {
                match base_hash.get(key) {
                    Some(base_value) => {
                        result.insert(key.clone(), merge_yaml(base_value, value));
                    }
                    None => {
                        result.insert(key.clone(), value.clone());
                    }
                }
            }
            Yaml::Hash(result)
        }
        (_, override_value) => override_value.clone(),
    }
}
