// texture.rs - face textures with a gray placeholder and background loading

use image::io::Reader as ImageReader;
use image::{Rgba, RgbaImage};
use once_cell::sync::Lazy;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

pub const PLACEHOLDER_SIZE: u32 = 128;
pub const PLACEHOLDER_COLOR: Rgba<u8> = Rgba([200, 200, 200, 255]);

static PLACEHOLDER: Lazy<Arc<RgbaImage>> = Lazy::new(|| {
    Arc::new(RgbaImage::from_pixel(
        PLACEHOLDER_SIZE,
        PLACEHOLDER_SIZE,
        PLACEHOLDER_COLOR,
    ))
});

/// Flat gray bitmap shown until a face image arrives.
pub fn placeholder() -> Arc<RgbaImage> {
    PLACEHOLDER.clone()
}

/// Image for one cube face. `needs_update` tells the renderer to re-upload it.
#[derive(Debug, Clone)]
pub struct Texture {
    path: String,
    image: Arc<RgbaImage>,
    loaded: bool,
    pub needs_update: bool,
}

impl Texture {
    pub fn placeholder(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            image: placeholder(),
            loaded: false,
            needs_update: true,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Swap the real image in place.
    pub fn replace(&mut self, image: RgbaImage) {
        self.image = Arc::new(image);
        self.loaded = true;
        self.needs_update = true;
    }
}

/// Decodes face images off the event loop. Results are applied by `poll`.
pub struct TextureLoader {
    tx: Sender<(usize, RgbaImage)>,
    rx: Receiver<(usize, RgbaImage)>,
}

impl Default for TextureLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureLoader {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    /// Fire-and-forget. A face that fails to load keeps its placeholder.
    pub fn load(&self, face: usize, path: &str) {
        let tx = self.tx.clone();
        let path = PathBuf::from(path);

        thread::spawn(move || {
            log::debug!("loading face {face} from {path:?}");

            let file = match File::open(&path) {
                Ok(f) => f,
                Err(e) => {
                    log::warn!("cannot open face texture {path:?}: {e}");
                    return;
                }
            };

            let img_result = ImageReader::new(BufReader::new(file))
                .with_guessed_format()
                .map_err(image::ImageError::IoError)
                .and_then(|r| r.decode());

            match img_result {
                Ok(img) => {
                    let rgba = img.to_rgba8();
                    log::debug!(
                        "face {face} decoded ({}x{})",
                        rgba.width(),
                        rgba.height()
                    );
                    // The widget may be gone already; nobody is waiting then.
                    let _ = tx.send((face, rgba));
                }
                Err(e) => log::warn!("cannot decode face texture {path:?}: {e}"),
            }
        });
    }

    /// Apply every finished load. Returns how many faces changed.
    pub fn poll(&self, textures: &mut [Texture]) -> usize {
        let mut swapped = 0;
        while let Ok((face, image)) = self.rx.try_recv() {
            if let Some(texture) = textures.get_mut(face) {
                texture.replace(image);
                swapped += 1;
            }
        }
        swapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn poll_until(loader: &TextureLoader, textures: &mut [Texture], want: usize) -> usize {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut got = 0;
        while got < want && Instant::now() < deadline {
            got += loader.poll(textures);
            thread::sleep(Duration::from_millis(5));
        }
        got
    }

    #[test]
    fn placeholder_is_flat_gray() {
        let t = Texture::placeholder("/missing.png");
        assert_eq!(t.image().dimensions(), (128, 128));
        assert!(t.image().pixels().all(|p| *p == PLACEHOLDER_COLOR));
        assert!(!t.is_loaded());
        assert!(t.needs_update);
    }

    #[test]
    fn decoded_image_replaces_placeholder() {
        let path = std::env::temp_dir().join(format!(
            "cube_panorama_face_{}.png",
            std::process::id()
        ));
        RgbaImage::from_pixel(4, 2, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let path_str = path.to_string_lossy().into_owned();
        let mut textures = vec![
            Texture::placeholder("/nope.png"),
            Texture::placeholder(path_str.clone()),
        ];
        textures[1].needs_update = false;

        let loader = TextureLoader::new();
        loader.load(1, &path_str);

        assert_eq!(poll_until(&loader, &mut textures, 1), 1);
        assert!(textures[1].is_loaded());
        assert!(textures[1].needs_update);
        assert_eq!(textures[1].image().dimensions(), (4, 2));
        assert!(!textures[0].is_loaded());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_keeps_placeholder() {
        let mut textures = vec![Texture::placeholder("/definitely/not/here.jpg")];
        let loader = TextureLoader::new();
        loader.load(0, "/definitely/not/here.jpg");

        thread::sleep(Duration::from_millis(50));
        assert_eq!(loader.poll(&mut textures), 0);
        assert!(!textures[0].is_loaded());
        assert_eq!(textures[0].image().dimensions(), (128, 128));
    }
}
