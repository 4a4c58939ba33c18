use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use log::warn;

use crate::element::ElementId;
use crate::error::ImageLoadError;

struct CachedTexture {
    /// Source the texture was decoded from; a changed source reloads it.
    source: String,
    /// `None` remembers a failed decode so it is not retried every frame.
    texture: Option<TextureHandle>,
    last_used: u64,
}

/// Decoded image textures per element, with least-recently-used eviction.
pub struct TextureManager {
    textures: HashMap<ElementId, CachedTexture>,
    /// Current frame counter for LRU tracking
    current_frame: u64,
    max_cache_size: usize,
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("cached", &self.textures.len())
            .field("current_frame", &self.current_frame)
            .field("max_cache_size", &self.max_cache_size)
            .finish()
    }
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            textures: HashMap::new(),
            current_frame: 0,
            max_cache_size: max_cache_size.max(1),
        }
    }

    /// Should be called at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Returns the texture for `element_id`, decoding `source` with `loader`
    /// on a cache miss. Failed decodes are logged once and yield `None`.
    pub fn get_or_load<F>(
        &mut self,
        element_id: ElementId,
        source: &str,
        loader: F,
        ctx: &Context,
    ) -> Option<TextureHandle>
    where
        F: FnOnce() -> Result<ColorImage, ImageLoadError>,
    {
        if let Some(cached) = self.textures.get_mut(&element_id) {
            if cached.source == source {
                cached.last_used = self.current_frame;
                return cached.texture.clone();
            }
        }

        self.textures.remove(&element_id);
        self.prune_cache_if_needed();

        let texture = match loader() {
            Ok(image) => Some(ctx.load_texture(
                format!("board_image_{element_id}"),
                image,
                TextureOptions::LINEAR,
            )),
            Err(err) => {
                warn!("Failed to load image for element {element_id}: {err}");
                None
            }
        };

        self.textures.insert(
            element_id,
            CachedTexture {
                source: source.to_owned(),
                texture: texture.clone(),
                last_used: self.current_frame,
            },
        );
        texture
    }

    /// Drops the texture of a deleted element.
    pub fn invalidate_element(&mut self, element_id: ElementId) {
        self.textures.remove(&element_id);
    }

    /// Makes room for one more entry by evicting the least recently used ones.
    fn prune_cache_if_needed(&mut self) {
        if self.textures.len() < self.max_cache_size {
            return;
        }

        let mut entries: Vec<(ElementId, u64)> = self
            .textures
            .iter()
            .map(|(id, cached)| (*id, cached.last_used))
            .collect();
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = self.textures.len() + 1 - self.max_cache_size;
        for (id, _) in entries.into_iter().take(to_remove) {
            self.textures.remove(&id);
        }
    }

    pub fn cache_size(&self) -> usize {
        self.textures.len()
    }

    #[cfg(test)]
    fn contains(&self, element_id: ElementId) -> bool {
        self.textures.contains_key(&element_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn mock_texture_generator() -> Result<ColorImage, ImageLoadError> {
        Ok(ColorImage::new([10, 10], egui::Color32::WHITE))
    }

    #[test]
    fn test_cache_hit() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let id = ElementId::new_random();
        let loads = Cell::new(0);

        for _ in 0..2 {
            let texture = manager.get_or_load(
                id,
                "a.png",
                || {
                    loads.set(loads.get() + 1);
                    mock_texture_generator()
                },
                &ctx,
            );
            assert!(texture.is_some());
        }

        assert_eq!(loads.get(), 1);
        assert_eq!(manager.cache_size(), 1);
    }

    #[test]
    fn test_changed_source_reloads() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let id = ElementId::new_random();
        let loads = Cell::new(0);
        let mut load = |source: &str| {
            manager.get_or_load(
                id,
                source,
                || {
                    loads.set(loads.get() + 1);
                    mock_texture_generator()
                },
                &ctx,
            )
        };

        load("a.png");
        load("b.png");
        assert_eq!(loads.get(), 2);
        assert_eq!(manager.cache_size(), 1);
    }

    #[test]
    fn test_failures_are_cached() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let id = ElementId::new_random();
        let loads = Cell::new(0);

        for _ in 0..3 {
            let texture = manager.get_or_load(
                id,
                "broken.png",
                || {
                    loads.set(loads.get() + 1);
                    Err(ImageLoadError::Unsupported)
                },
                &ctx,
            );
            assert!(texture.is_none());
        }
        assert_eq!(loads.get(), 1);
    }

    #[test]
    fn test_invalidation() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let id = ElementId::new_random();

        manager.get_or_load(id, "a.png", mock_texture_generator, &ctx);
        assert_eq!(manager.cache_size(), 1);

        manager.invalidate_element(id);
        assert_eq!(manager.cache_size(), 0);
    }

    #[test]
    fn test_lru_eviction() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(2);
        let ids = [ElementId::new_random(), ElementId::new_random(), ElementId::new_random()];

        manager.get_or_load(ids[0], "1.png", mock_texture_generator, &ctx);
        manager.begin_frame();
        manager.get_or_load(ids[1], "2.png", mock_texture_generator, &ctx);
        manager.begin_frame();
        manager.get_or_load(ids[2], "3.png", mock_texture_generator, &ctx);

        assert_eq!(manager.cache_size(), 2);
        assert!(!manager.contains(ids[0]));
        assert!(manager.contains(ids[1]));
        assert!(manager.contains(ids[2]));
    }
}
