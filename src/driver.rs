use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const SOURCE_EXTENSION: &str = "jack";
pub const OUTPUT_EXTENSION: &str = "vm";
pub const XML_EXTENSION: &str = "xml";

fn is_source(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// A `.jack` file is a single unit; a directory yields its `.jack` entries
/// sorted by name.
pub fn discover_sources(path: &Path) -> Result<Vec<PathBuf>> {
    let display = path.display().to_string();

    if path.is_dir() {
        let entries = fs::read_dir(path).map_err(|e| Error::FileOpen(display.clone(), e))?;
        let mut sources = vec![];
        for entry in entries {
            let entry = entry.map_err(|e| Error::FileOpen(display.clone(), e))?;
            let p = entry.path();
            if p.is_file() && is_source(&p) {
                sources.push(p);
            }
        }
        sources.sort();
        if sources.is_empty() {
            return Err(Error::NoSources(display));
        }
        Ok(sources)
    } else if is_source(path) {
        Ok(vec![path.to_path_buf()])
    } else {
        Err(Error::NoSources(display))
    }
}

pub fn output_path(source: &Path) -> PathBuf {
    source.with_extension(OUTPUT_EXTENSION)
}

/// `Name.jack` → (`NameT.xml`, `Name.xml`): the token listing and the parse tree.
pub fn xml_output_paths(source: &Path) -> (PathBuf, PathBuf) {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tokens = source.with_file_name(format!("{}T.{}", stem, XML_EXTENSION));
    (tokens, source.with_extension(XML_EXTENSION))
}

pub fn read_source(source: &Path) -> Result<String> {
    fs::read_to_string(source).map_err(|e| Error::FileOpen(source.display().to_string(), e))
}

pub fn write_output(path: &Path, code: &str) -> Result<()> {
    let display = path.display().to_string();
    let file = fs::File::create(path).map_err(|e| Error::FileCreate(display.clone(), e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(code.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| Error::FileWrite(display, e))
}

/// Reads, compiles and writes one unit. Nothing is written unless the unit
/// compiles.
pub fn compile_file(source: &Path) -> Result<PathBuf> {
    let text = read_source(source)?;
    let code = crate::compile(&text)?;
    let out = output_path(source);
    write_output(&out, &code)?;
    Ok(out)
}

/// Like `compile_file`, but also writes the XML listings. Returns every path
/// written, `.vm` first.
pub fn analyze_file(source: &Path) -> Result<Vec<PathBuf>> {
    let text = read_source(source)?;
    let analysis = crate::analyze(&text)?;

    let out = output_path(source);
    let (tokens, tree) = xml_output_paths(source);
    write_output(&out, &analysis.code)?;
    write_output(&tokens, &analysis.tokens)?;
    write_output(&tree, &analysis.tree)?;
    Ok(vec![out, tokens, tree])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_sits_next_to_source() {
        assert_eq!(
            output_path(Path::new("dir/Main.jack")),
            PathBuf::from("dir/Main.vm")
        );
    }

    #[test]
    fn xml_listings_sit_next_to_source() {
        assert_eq!(
            xml_output_paths(Path::new("dir/Main.jack")),
            (PathBuf::from("dir/MainT.xml"), PathBuf::from("dir/Main.xml"))
        );
    }

    #[test]
    fn other_extensions_are_not_sources() {
        assert!(matches!(
            discover_sources(Path::new("notes.txt")),
            Err(Error::NoSources(_))
        ));
    }
}
