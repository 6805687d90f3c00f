use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    rc::Rc,
};

/// An image made out of text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsciiImage {
    lines: Vec<String>,
}

impl AsciiImage {
    pub fn new(contents: &str) -> Self {
        let lines = contents.lines().map(|line| line.trim_end().to_string()).collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

/// Manages resources pulled from the filesystem such as images.
pub struct Resources {
    base_path: PathBuf,
    images: HashMap<PathBuf, Rc<AsciiImage>>,
}

impl Resources {
    /// Construct a new resource manager over the provided based path.
    ///
    /// Any relative paths will be assumed to be relative to the given base.
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self { base_path: base_path.into(), images: Default::default() }
    }

    /// Get the image at the given path.
    ///
    /// Images are cached so subsequent lookups for the same path will be quick.
    pub fn image<P: AsRef<Path>>(&mut self, path: P) -> Result<Rc<AsciiImage>, LoadAssetError> {
        let path = self.base_path.join(path);
        if let Some(image) = self.images.get(&path) {
            return Ok(image.clone());
        }

        let contents = fs::read_to_string(&path).map_err(|e| LoadAssetError::Io(path.clone(), e))?;
        let image = Rc::new(AsciiImage::new(&contents));
        self.images.insert(path, image.clone());
        Ok(image)
    }

    /// Clears all cached resources.
    pub fn clear(&mut self) {
        self.images.clear();
    }
}

/// An error loading an asset.
#[derive(thiserror::Error, Debug)]
pub enum LoadAssetError {
    #[error("io error opening {0}: {1}")]
    Io(PathBuf, io::Error),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn load_image() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        fs::write(dir.path().join("cat.txt"), " /\\_/\\   \n( o.o )\n").unwrap();
        let mut resources = Resources::new(dir.path());
        let image = resources.image("cat.txt").expect("loading failed");
        assert_eq!(image.lines(), &[" /\\_/\\", "( o.o )"]);
        assert_eq!(image.height(), 2);

        // Cached images don't need the file anymore.
        fs::remove_file(dir.path().join("cat.txt")).unwrap();
        assert!(resources.image("cat.txt").is_ok());
        resources.clear();
        assert!(resources.image("cat.txt").is_err());
    }

    #[test]
    fn missing_image() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut resources = Resources::new(dir.path());
        let result = resources.image("nope.txt");
        assert!(matches!(result, Err(LoadAssetError::Io(..))));
    }
}
