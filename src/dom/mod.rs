//! 页面文档 - 元素树、类名、行内样式和布局结果
//!
//! 选择器只支持 `.class` 和标签名两种形式，按文档顺序匹配。

mod binding;

pub use binding::{CarouselBinding, CarouselRoles, DomCarouselSurface};

use crate::Rect;
use std::collections::{BTreeSet, HashMap};

/// 元素句柄（文档内索引）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// 行内样式
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InlineStyle {
    /// translateX(…%)
    pub translate_x_percent: f32,
    /// translateY(…px)
    pub translate_y_px: f32,
    /// transition 声明，None 表示 `transition: none`
    pub transition: Option<String>,
    /// width: …%
    pub width_percent: Option<f32>,
    /// font-size: …px
    pub font_size: Option<f32>,
    /// 背景透明度覆盖
    pub background_alpha: Option<f32>,
}

impl InlineStyle {
    /// CSS transform 文本
    pub fn transform_css(&self) -> String {
        let mut parts = Vec::new();
        if self.translate_x_percent != 0.0 {
            parts.push(format!("translateX({}%)", self.translate_x_percent));
        }
        if self.translate_y_px != 0.0 {
            parts.push(format!("translateY({}px)", self.translate_y_px));
        }
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(" ")
        }
    }
}

/// 布局提示，供布局引擎构建 flex 节点
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxHint {
    /// 横向排列子元素
    pub row: bool,
    /// 子元素在主轴和交叉轴上居中
    pub centered: bool,
    /// 固定高度；None 由子元素撑开
    pub height: Option<f32>,
    /// 固定宽度（像素）
    pub width: Option<f32>,
    /// 相对父元素的宽度百分比；与 `width` 都为 None 时撑满父元素
    pub width_percent: Option<f32>,
    pub padding: f32,
    pub gap: f32,
    /// 不参与文档流（固定在视口上的元素）
    pub out_of_flow: bool,
}

#[derive(Debug, Clone)]
pub struct Element {
    pub id: ElementId,
    pub tag: String,
    pub classes: BTreeSet<String>,
    pub attrs: HashMap<String, String>,
    pub text: String,
    pub style: InlineStyle,
    pub hint: BoxHint,
    /// 布局结果（文档坐标）
    pub rect: Rect,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
}

impl Element {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    fn matches(&self, selector: &str) -> bool {
        match selector.strip_prefix('.') {
            Some(class) => self.has_class(class),
            None => self.tag == selector,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    root: ElementId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// 创建只有 body 的文档
    pub fn new() -> Self {
        let root = ElementId(0);
        let body = Element {
            id: root,
            tag: "body".to_string(),
            classes: BTreeSet::new(),
            attrs: HashMap::new(),
            text: String::new(),
            style: InlineStyle::default(),
            hint: BoxHint::default(),
            rect: Rect::default(),
            parent: None,
            children: Vec::new(),
        };
        Self {
            elements: vec![body],
            root,
        }
    }

    pub fn body(&self) -> ElementId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        // body 始终存在
        false
    }

    /// 在 `parent` 下追加元素
    pub fn create_element(&mut self, parent: ElementId, tag: &str, classes: &[&str]) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            id,
            tag: tag.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            attrs: HashMap::new(),
            text: String::new(),
            style: InlineStyle::default(),
            hint: BoxHint::default(),
            rect: Rect::default(),
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(p) = self.elements.get_mut(parent.0) {
            p.children.push(id);
        }
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    pub fn style_mut(&mut self, id: ElementId) -> Option<&mut InlineStyle> {
        self.get_mut(id).map(|e| &mut e.style)
    }

    pub fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(e) = self.get_mut(id) {
            e.text = text.to_string();
        }
    }

    pub fn set_attr(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(e) = self.get_mut(id) {
            e.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn set_hint(&mut self, id: ElementId, hint: BoxHint) {
        if let Some(e) = self.get_mut(id) {
            e.hint = hint;
        }
    }

    pub fn rect(&self, id: ElementId) -> Rect {
        self.get(id).map(|e| e.rect).unwrap_or_default()
    }

    /// 文档顺序（先序）遍历
    pub fn descendants(&self, from: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(e) = self.get(id) {
                stack.extend(e.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn query_selector(&self, selector: &str) -> Option<ElementId> {
        self.descendants(self.root)
            .into_iter()
            .find(|id| self.get(*id).map(|e| e.matches(selector)).unwrap_or(false))
    }

    pub fn query_selector_all(&self, selector: &str) -> Vec<ElementId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|id| self.get(*id).map(|e| e.matches(selector)).unwrap_or(false))
            .collect()
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id).map(|e| e.has_class(class)).unwrap_or(false)
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(e) = self.get_mut(id) {
            e.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(e) = self.get_mut(id) {
            e.classes.remove(class);
        }
    }

    /// classList.toggle(class, force)
    pub fn toggle_class(&mut self, id: ElementId, class: &str, force: bool) {
        if force {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    /// 文档总高度（body 的布局高度）
    pub fn content_height(&self) -> f32 {
        self.rect(self.root).bottom()
    }
}
