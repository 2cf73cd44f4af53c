//! 布局 - 用 Taffy 把文档树排成纵向流式页面
//!
//! 文本块的高度在建树前按可用宽度折行估算；`out_of_flow` 元素
//! （吸顶导航、进度条）不进文档流，固定在视口顶部。

use crate::dom::{Document, ElementId};
use crate::error::{EssayError, Result};
use crate::text::{wrap_lines, TextMeasure};
use crate::Rect;
use std::collections::HashMap;
use taffy::geometry::{Rect as TaffyRect, Size as TaffySize};
use taffy::prelude::TaffyMaxContent;
use taffy::style::{AlignItems, Dimension, FlexDirection, JustifyContent, Style};
use taffy::style_helpers::{auto, length, percent};
use taffy::tree::NodeId;
use taffy::TaffyTree;

/// 行高倍数
pub const LINE_HEIGHT: f32 = 1.5;
/// 未指定字号时的正文字号
pub const BODY_FONT_SIZE: f32 = 17.0;

/// 折行后的文本块高度，至少一行
pub fn text_block_height(measure: &dyn TextMeasure, text: &str, font_size: f32, available: f32) -> f32 {
    let lines = wrap_lines(measure, text, font_size, available.max(1.0)).len().max(1);
    lines as f32 * font_size * LINE_HEIGHT
}

fn layout_err(e: taffy::TaffyError) -> EssayError {
    EssayError::Layout(format!("{:?}", e))
}

struct Builder<'a> {
    doc: &'a Document,
    measure: &'a dyn TextMeasure,
    tree: TaffyTree<()>,
    nodes: HashMap<ElementId, NodeId>,
}

impl Builder<'_> {
    fn style_for(&self, id: ElementId, available: f32) -> Style {
        let Some(element) = self.doc.get(id) else {
            return Style::default();
        };
        let hint = &element.hint;

        let width: Dimension = match (hint.width, hint.width_percent) {
            (Some(px), _) => length(px),
            (None, Some(pct)) => percent(pct / 100.0),
            (None, None) => auto(),
        };
        let height: Dimension = match hint.height {
            Some(px) => length(px),
            None if !element.text.is_empty() => {
                let size = element.style.font_size.unwrap_or(BODY_FONT_SIZE);
                length(text_block_height(self.measure, &element.text, size, available))
            }
            None => auto(),
        };

        Style {
            flex_direction: if hint.row { FlexDirection::Row } else { FlexDirection::Column },
            size: TaffySize { width, height },
            padding: TaffyRect {
                left: length(hint.padding),
                right: length(hint.padding),
                top: length(hint.padding),
                bottom: length(hint.padding),
            },
            gap: TaffySize {
                width: length(hint.gap),
                height: length(hint.gap),
            },
            flex_shrink: 0.0,
            justify_content: if hint.centered { Some(JustifyContent::Center) } else { None },
            align_items: if hint.centered { Some(AlignItems::Center) } else { None },
            ..Default::default()
        }
    }

    /// `available` 为该元素可用的内容宽度，仅用于文本折行估算
    fn build(&mut self, id: ElementId, available: f32) -> Result<Option<NodeId>> {
        let Some(element) = self.doc.get(id) else {
            return Ok(None);
        };
        if element.hint.out_of_flow {
            return Ok(None);
        }

        let own_width = match (element.hint.width, element.hint.width_percent) {
            (Some(px), _) => px,
            (None, Some(pct)) => available * pct / 100.0,
            (None, None) => available,
        };
        let inner = (own_width - element.hint.padding * 2.0).max(0.0);

        let mut children = Vec::new();
        for child in element.children.clone() {
            if let Some(node) = self.build(child, inner)? {
                children.push(node);
            }
        }

        let style = self.style_for(id, inner);
        let node = if children.is_empty() {
            self.tree.new_leaf(style).map_err(layout_err)?
        } else {
            self.tree.new_with_children(style, &children).map_err(layout_err)?
        };
        self.nodes.insert(id, node);
        Ok(Some(node))
    }

    fn place(&self, id: ElementId, origin_x: f32, origin_y: f32, out: &mut Vec<(ElementId, Rect)>) -> Result<()> {
        let Some(node) = self.nodes.get(&id) else {
            return Ok(());
        };
        let layout = self.tree.layout(*node).map_err(layout_err)?;
        let x = origin_x + layout.location.x;
        let y = origin_y + layout.location.y;
        out.push((id, Rect::new(x, y, layout.size.width, layout.size.height)));

        if let Some(element) = self.doc.get(id) {
            for child in &element.children {
                self.place(*child, x, y, out)?;
            }
        }
        Ok(())
    }
}

/// 计算所有元素的文档坐标，返回文档总高度
pub fn layout_document(doc: &mut Document, viewport_width: f32, measure: &dyn TextMeasure) -> Result<f32> {
    let body = doc.body();
    let mut placed = Vec::new();
    {
        let mut builder = Builder {
            doc,
            measure,
            tree: TaffyTree::new(),
            nodes: HashMap::new(),
        };
        let root = builder
            .build(body, viewport_width)?
            .ok_or_else(|| EssayError::Layout("body is out of flow".to_string()))?;

        // 根节点宽度固定为视口宽度
        let mut root_style = builder.tree.style(root).map_err(layout_err)?.clone();
        root_style.size.width = length(viewport_width);
        builder.tree.set_style(root, root_style).map_err(layout_err)?;

        // 文本高度按小数估算，保持与 text_block_height 一致
        builder.tree.disable_rounding();
        builder
            .tree
            .compute_layout(root, TaffySize::MAX_CONTENT)
            .map_err(layout_err)?;
        builder.place(body, 0.0, 0.0, &mut placed)?;
    }

    for (id, rect) in placed {
        if let Some(element) = doc.get_mut(id) {
            element.rect = rect;
        }
    }

    // 视口固定元素
    for id in doc.descendants(body) {
        let Some(element) = doc.get_mut(id) else { continue };
        if element.hint.out_of_flow {
            let height = element.hint.height.unwrap_or(0.0);
            element.rect = Rect::new(0.0, 0.0, viewport_width, height);
        }
    }

    let height = doc.rect(body).height;
    tracing::debug!("layout: {} elements, content height {:.0}", doc.len(), height);
    Ok(height)
}
