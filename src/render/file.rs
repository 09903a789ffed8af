use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::answers::Answers;
use crate::error::{Result, StampError};
use crate::placeholder::stream::stream_text;
use crate::placeholder::ReplacerSet;

/// Substitute answered path placeholders in one file or directory name.
pub fn render_path_component(component: &str, replacers: &ReplacerSet, answers: &Answers) -> String {
    replacers.apply(component, answers).into_owned()
}

/// Stream `src` into `dest`, substituting answered content placeholders.
///
/// Any IO or decoding failure is returned so the caller can fall back to a
/// verbatim copy; `dest` may be partially written in that case.
pub fn render_file_content(
    src: &Path,
    dest: &Path,
    replacers: &ReplacerSet,
    answers: &Answers,
    chunk_size: usize,
) -> io::Result<()> {
    let reader = File::open(src)?;
    let mut writer = BufWriter::new(File::create(dest)?);
    stream_text(reader, chunk_size, |text| {
        writer.write_all(replacers.apply(text, answers).as_bytes())
    })?;
    writer.flush()
}

/// Byte-for-byte copy, creating the destination's parent directories.
pub fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    ensure_parent(dest)?;
    std::fs::copy(src, dest).map_err(|e| StampError::Io {
        context: format!("copying {} to {}", src.display(), dest.display()),
        source: e,
    })?;
    Ok(())
}

pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StampError::Io {
            context: format!("creating directory {}", parent.display()),
            source: e,
        })?;
    }
    Ok(())
}

/// Detect binary files using content_inspector (BOM-aware, null-byte scanning).
///
/// Reads only the first 8KB to avoid unnecessary allocation for large files.
pub fn is_binary_file(path: &Path) -> bool {
    use std::io::Read;

    let Ok(file) = File::open(path) else {
        return false;
    };

    let mut buf = [0u8; 8192];
    let Ok(n) = file.take(8192).read(&mut buf) else {
        return false;
    };

    !content_inspector::inspect(&buf[..n]).is_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use std::fs;

    fn answers(pairs: &[(&str, &str)]) -> Answers {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect()
    }

    fn replacers(names: &[&str]) -> ReplacerSet {
        let mut set = ReplacerSet::new();
        for name in names {
            set.insert(name);
        }
        set
    }

    #[rstest]
    #[case(b"Hello, world!", false)] // text file, not binary
    #[case(&(0..256).map(|i| i as u8).collect::<Vec<u8>>(), true)] // binary file with null bytes
    fn test_is_binary_file(#[case] content: &[u8], #[case] expected_binary: bool) {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("test.bin");
        fs::write(&file, content).unwrap();

        assert_eq!(is_binary_file(&file), expected_binary);
    }

    #[test]
    fn test_is_binary_file_nonexistent_file() {
        let result = is_binary_file(&std::path::PathBuf::from("/nonexistent/file.txt"));
        assert!(!result);
    }

    #[rstest]
    #[case("____PROJECT____", "demo")]
    #[case("____PROJECT____-____KIND____.md", "demo-lib.md")]
    #[case("____MISSING____.txt", "____MISSING____.txt")]
    #[case("plain.txt", "plain.txt")]
    fn test_render_path_component(#[case] input: &str, #[case] expected: &str) {
        let set = replacers(&["PROJECT", "KIND", "MISSING"]);
        let answers = answers(&[("PROJECT", "demo"), ("KIND", "lib")]);
        assert_eq!(render_path_component(input, &set, &answers), expected);
    }

    #[test]
    fn test_render_file_content_with_tiny_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.txt");
        let dest = dir.path().join("out.txt");
        fs::write(&src, "Hello ____NAME____!\nBye ____NAME____, ____OTHER____").unwrap();

        let set = replacers(&["NAME", "OTHER"]);
        render_file_content(&src, &dest, &set, &answers(&[("NAME", "Ada")]), 5).unwrap();

        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            "Hello Ada!\nBye Ada, ____OTHER____"
        );
    }

    #[test]
    fn test_render_file_content_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.txt");
        fs::write(&src, b"caf\xe9 ____NAME____").unwrap();

        let set = replacers(&["NAME"]);
        let err = render_file_content(
            &src,
            &dir.path().join("out.txt"),
            &set,
            &answers(&[("NAME", "x")]),
            64,
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_copy_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.bin");
        fs::write(&src, [0u8, 159, 146, 150]).unwrap();
        let dest = dir.path().join("a/b/c.bin");

        copy_file(&src, &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), vec![0u8, 159, 146, 150]);
    }
}
