use crate::core::Viewport;

use super::{
    CanvasLayerKind, LayerStack, LinePrimitive, PolylinePrimitive, RectPrimitive, RenderFrame,
    TextPrimitive,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    fn empty(kind: CanvasLayerKind) -> Self {
        Self {
            kind,
            rects: Vec::new(),
            lines: Vec::new(),
            polylines: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
            && self.lines.is_empty()
            && self.polylines.is_empty()
            && self.texts.is_empty()
    }

    fn extend_frame(&self, frame: &mut RenderFrame) {
        frame.rects.extend(self.rects.iter().copied());
        frame.lines.extend(self.lines.iter().copied());
        frame.polylines.extend(self.polylines.iter().cloned());
        frame.texts.extend(self.texts.iter().cloned());
    }
}

/// Render frame split into paint-ordered layers.
///
/// The cached view rasterizes layer groups separately; the immediate view
/// flattens everything into one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredRenderFrame {
    pub viewport: Viewport,
    pub layers: Vec<LayerPrimitives>,
}

impl LayeredRenderFrame {
    #[must_use]
    pub fn from_stack(viewport: Viewport, stack: LayerStack) -> Self {
        let layers = stack
            .layers
            .into_iter()
            .map(LayerPrimitives::empty)
            .collect();
        Self { viewport, layers }
    }

    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self::from_stack(viewport, LayerStack::canonical())
    }

    pub fn push_rect(&mut self, kind: CanvasLayerKind, rect: RectPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.rects.push(rect);
        }
    }

    pub fn push_line(&mut self, kind: CanvasLayerKind, line: LinePrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.lines.push(line);
        }
    }

    pub fn push_polyline(&mut self, kind: CanvasLayerKind, polyline: PolylinePrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.polylines.push(polyline);
        }
    }

    pub fn push_text(&mut self, kind: CanvasLayerKind, text: TextPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.texts.push(text);
        }
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    #[must_use]
    pub fn flatten(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        for layer in &self.layers {
            layer.extend_frame(&mut frame);
        }
        frame
    }

    /// Flattens only the listed layers, keeping stack order.
    #[must_use]
    pub fn flatten_layers(&self, include_layers: &[CanvasLayerKind]) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        for layer in &self.layers {
            if include_layers.contains(&layer.kind) {
                layer.extend_frame(&mut frame);
            }
        }
        frame
    }

    fn layer_mut(&mut self, kind: CanvasLayerKind) -> Option<&mut LayerPrimitives> {
        self.layers.iter_mut().find(|layer| layer.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::LayeredRenderFrame;
    use crate::core::Viewport;
    use crate::render::{
        CanvasLayerKind, Color, DATA_RASTER_LAYERS, LinePrimitive, PathPoint, PolylinePrimitive,
        TextHAlign, TextPrimitive,
    };

    #[test]
    fn layered_render_frame_flattens_in_stack_order() {
        let mut layered = LayeredRenderFrame::new(Viewport::new(100, 50));

        layered.push_polyline(
            CanvasLayerKind::Series,
            PolylinePrimitive::new(
                vec![PathPoint { x: 0.0, y: 2.0 }, PathPoint { x: 5.0, y: 3.0 }],
                2.0,
                Color::rgb(0.8, 0.2, 0.2),
            ),
        );
        layered.push_line(
            CanvasLayerKind::Grid,
            LinePrimitive::new(0.0, 1.0, 5.0, 1.0, 1.0, Color::rgb(0.2, 0.2, 0.2)),
        );
        layered.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new("x", 2.0, 4.0, 10.0, Color::rgb(0.0, 0.0, 0.0), TextHAlign::Left),
        );

        let flattened = layered.flatten();
        assert_eq!(flattened.lines.len(), 1);
        assert_eq!(flattened.polylines.len(), 1);
        assert_eq!(flattened.texts.len(), 1);

        let data_only = layered.flatten_layers(&DATA_RASTER_LAYERS);
        assert!(data_only.lines.is_empty());
        assert_eq!(data_only.polylines.len(), 1);
    }
}
