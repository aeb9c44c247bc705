use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file_spec: FileSpec) {
    if let Some(parent) = file_spec.path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(&file_spec.path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file_spec.path, e));
}

/// Write the same file under every root
pub fn write_mirrored(roots: &[&Path], relative_path: &str, content: &str) {
    for root in roots {
        write_file(FileSpec::new(root.join(relative_path), content.to_string()));
    }
}

/// Write randomly named files with random words; returns the distinct names
pub fn write_generated_files(roots: &[&Path], files_count: usize) -> Vec<String> {
    use fake::{
        Fake,
        faker::lorem::en::{Word, Words},
    };

    let mut names = (0..files_count)
        .map(|_| {
            let file_name = format!("{}.txt", Word().fake::<String>());
            let file_content = Words(5..10).fake::<Vec<String>>().join(" ");
            write_mirrored(roots, &file_name, &file_content);
            file_name
        })
        .collect::<Vec<_>>();

    names.sort();
    names.dedup();
    names
}

pub fn create_directory(path: &Path) {
    std::fs::create_dir_all(path)
        .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", path, e));
}
