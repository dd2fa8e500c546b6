use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    Grid,
    Axis,
    Series,
}

/// Layers baked into the cached background raster.
pub const BACKGROUND_RASTER_LAYERS: [CanvasLayerKind; 3] = [
    CanvasLayerKind::Background,
    CanvasLayerKind::Grid,
    CanvasLayerKind::Axis,
];

/// Layers baked into the cached data raster that pan/zoom crops.
pub const DATA_RASTER_LAYERS: [CanvasLayerKind; 1] = [CanvasLayerKind::Series];

/// Bottom-to-top paint order of chart layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStack {
    pub layers: Vec<CanvasLayerKind>,
}

impl LayerStack {
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            layers: BACKGROUND_RASTER_LAYERS
                .iter()
                .chain(DATA_RASTER_LAYERS.iter())
                .copied()
                .collect(),
        }
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::canonical()
    }
}
