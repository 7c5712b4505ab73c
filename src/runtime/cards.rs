//! 商品卡片组件
//!
//! ProductCard 是网格单元里的紧凑卡片，FeaturedCard 是通栏的
//! 推荐卡片。卡片在被放进行里之后才能确定自身坐标，因此子组件
//! 的排布放在 layout_children 里做。

use crate::catalog::Product;
use crate::ui::component::{Component, ComponentId, Style};
use crate::ui::image::Image;
use crate::ui::text::{FontWeight, Text};
use crate::{Canvas, Color, ImageFit};

/// 卡片背景色
const CARD_BACKGROUND: Color = Color::WHITE;
/// 副文案颜色
const SECONDARY_TEXT: Color = Color::rgb(0x8E, 0x8E, 0x93);
/// 卡片圆角
const CARD_RADIUS: f32 = 12.0;

/// 网格商品卡片：缩略图 + 标题 + 价格
pub struct ProductCard {
    id: ComponentId,
    style: Style,
    children: Vec<Box<dyn Component>>,
}

impl ProductCard {
    pub fn new(product: &Product) -> Self {
        let mut style = Style::default();
        style.background_color = Some(CARD_BACKGROUND);
        style.border_radius = CARD_RADIUS;

        let image = Image::from_src(&product.thumbnail)
            .with_mode(ImageFit::Cover)
            .with_border_radius(8.0);
        let title = Text::new(&product.title).with_font_size(14.0);
        let price = Text::new(&format!("${:.2}", product.price))
            .with_font_size(15.0)
            .with_font_weight(FontWeight::Bold)
            .with_color(Color::ACCENT);

        Self {
            id: ComponentId::new(),
            style,
            children: vec![Box::new(image), Box::new(title), Box::new(price)],
        }
    }
}

impl Component for ProductCard {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn render(&self, canvas: &mut Canvas) {
        canvas.fill_round_rect(&self.style.bounds(), self.style.border_radius, CARD_BACKGROUND);
    }

    fn children(&self) -> &[Box<dyn Component>] {
        &self.children
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Box<dyn Component>>> {
        Some(&mut self.children)
    }

    // 子组件顺序: [缩略图, 标题, 价格]
    fn layout_children(&mut self) {
        let b = self.style.bounds();
        let pad = 8.0;
        let text_block = 48.0;

        if let Some(image) = self.children.get_mut(0) {
            let s = image.style_mut();
            s.x = b.x + pad;
            s.y = b.y + pad;
            s.width = b.width - pad * 2.0;
            s.height = (b.height - pad * 2.0 - text_block).max(0.0);
        }
        if let Some(title) = self.children.get_mut(1) {
            let s = title.style_mut();
            s.x = b.x + 12.0;
            s.y = b.y + b.height - text_block;
            s.width = b.width - 24.0;
            s.height = 22.0;
        }
        if let Some(price) = self.children.get_mut(2) {
            let s = price.style_mut();
            s.x = b.x + 12.0;
            s.y = b.y + b.height - 26.0;
            s.width = b.width - 24.0;
            s.height = 20.0;
        }
    }

    fn type_name(&self) -> &'static str {
        "ProductCard"
    }
}

/// 通栏推荐卡片：大图 + 标题 + 推荐文案 + 价格
pub struct FeaturedCard {
    id: ComponentId,
    style: Style,
    children: Vec<Box<dyn Component>>,
}

impl FeaturedCard {
    pub fn new(product: &Product) -> Self {
        let mut style = Style::default();
        style.background_color = Some(CARD_BACKGROUND);
        style.border_radius = CARD_RADIUS;

        let image = Image::from_src(&product.thumbnail)
            .with_mode(ImageFit::Cover)
            .with_border_radius(8.0);
        let title = Text::new(&product.title)
            .with_font_size(17.0)
            .with_font_weight(FontWeight::Bold);
        let description = Text::new(product.description.as_deref().unwrap_or(""))
            .with_font_size(13.0)
            .with_color(SECONDARY_TEXT)
            .with_wrap(true);
        let price = Text::new(&format!("${:.2}", product.price))
            .with_font_size(16.0)
            .with_font_weight(FontWeight::Bold)
            .with_color(Color::ACCENT);

        Self {
            id: ComponentId::new(),
            style,
            children: vec![
                Box::new(image),
                Box::new(title),
                Box::new(description),
                Box::new(price),
            ],
        }
    }
}

impl Component for FeaturedCard {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn render(&self, canvas: &mut Canvas) {
        canvas.fill_round_rect(&self.style.bounds(), self.style.border_radius, CARD_BACKGROUND);
    }

    fn children(&self) -> &[Box<dyn Component>] {
        &self.children
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Box<dyn Component>>> {
        Some(&mut self.children)
    }

    // 子组件顺序: [大图, 标题, 文案, 价格]
    fn layout_children(&mut self) {
        let b = self.style.bounds();
        let pad = 8.0;
        let text_block = 96.0;

        if let Some(image) = self.children.get_mut(0) {
            let s = image.style_mut();
            s.x = b.x + pad;
            s.y = b.y + pad;
            s.width = b.width - pad * 2.0;
            s.height = (b.height - pad * 2.0 - text_block).max(0.0);
        }
        if let Some(title) = self.children.get_mut(1) {
            let s = title.style_mut();
            s.x = b.x + 12.0;
            s.y = b.y + b.height - text_block;
            s.width = b.width - 24.0;
            s.height = 24.0;
        }
        if let Some(description) = self.children.get_mut(2) {
            let s = description.style_mut();
            s.x = b.x + 12.0;
            s.y = b.y + b.height - text_block + 26.0;
            s.width = b.width - 24.0;
            s.height = 36.0;
        }
        if let Some(price) = self.children.get_mut(3) {
            let s = price.style_mut();
            s.x = b.x + 12.0;
            s.y = b.y + b.height - 28.0;
            s.width = b.width - 24.0;
            s.height = 22.0;
        }
    }

    fn type_name(&self) -> &'static str {
        "FeaturedCard"
    }
}
