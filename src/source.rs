//! Locating VM sources on disk and naming the assembly they produce.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{error::Error, program::Unit};

pub const VM_EXTENSION: &str = "vm";
pub const ASM_EXTENSION: &str = "asm";

/// A loaded program: its units in translation order and where to write it.
#[derive(Debug)]
pub struct Source {
    pub units: Vec<Unit>,
    pub output: PathBuf,
    pub is_directory: bool,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub fn is_vm_file(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == VM_EXTENSION)
}

fn unit_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The `.vm` files directly inside `dir`, sorted by file name.
pub fn vm_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = vec![];
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let path = entry.map_err(io_error(dir))?.path();
        if path.is_file() && is_vm_file(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// `Prog.vm` becomes `Prog.asm` beside it; directory `Prog` becomes `Prog/Prog.asm`.
pub fn output_path(path: &Path, is_directory: bool) -> Result<PathBuf, Error> {
    if !is_directory {
        return Ok(path.with_extension(ASM_EXTENSION));
    }
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => fs::canonicalize(path)
            .map_err(io_error(path))?
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::NotVmSource(path.to_path_buf()))?,
    };
    Ok(path.join(format!("{}.{}", name, ASM_EXTENSION)))
}

fn load_unit(path: &Path) -> Result<Unit, Error> {
    let data = fs::read_to_string(path).map_err(io_error(path))?;
    let unit = Unit::parse(&unit_name(path), &data)?;
    debug!("parsed {} ({} commands)", path.display(), unit.commands.len());
    Ok(unit)
}

pub fn load(path: &Path) -> Result<Source, Error> {
    if path.is_dir() {
        let files = vm_files(path)?;
        if files.is_empty() {
            return Err(Error::EmptyDirectory(path.to_path_buf()));
        }
        let units = files.iter().map(|file| load_unit(file)).collect::<Result<_, _>>()?;
        Ok(Source {
            units,
            output: output_path(path, true)?,
            is_directory: true,
        })
    } else if is_vm_file(path) {
        Ok(Source {
            units: vec![load_unit(path)?],
            output: output_path(path, false)?,
            is_directory: false,
        })
    } else {
        Err(Error::NotVmSource(path.to_path_buf()))
    }
}
