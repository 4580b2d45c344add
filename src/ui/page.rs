// SPDX-License-Identifier: MPL-2.0
//! The QR studio page: form, preview and language switches.

use super::document::{Document, Element};
use super::form::{
    Field, CANVAS, DOWNLOAD_BUTTON, GENERATE_BUTTON, HIDDEN_CLASS, ICON_PREVIEW, PLACEHOLDER,
};
use crate::config::defaults::*;
use crate::config::RenderConfig;
use crate::i18n::Language;
use crate::qr::options::{
    BorderRadius, BorderStyle, BorderWidth, ErrorCorrection, IconPercent, Margin, QrSize,
};

fn label(key: &str) -> Element {
    Element::new("label").tag("data-i18n", key)
}

fn range(field: Field, key: &str, value: u32) -> [Element; 3] {
    let label_id = field.value_label_id().unwrap_or_default();
    [
        label(key),
        Element::new("input")
            .id(field.id())
            .attr("type", "range")
            .tag("data-i18n-aria", key)
            .value(value.to_string()),
        Element::new("span").id(&label_id),
    ]
}

fn color(field: Field, key: &str, value: String) -> [Element; 2] {
    [
        label(key),
        Element::new("input")
            .id(field.id())
            .attr("type", "color")
            .value(value),
    ]
}

fn select(field: Field, key: &str, value: &str, options: &[(&str, &str)]) -> [Element; 2] {
    let options = options.iter().map(|(option, option_key)| {
        Element::new("option")
            .attr("value", option)
            .tag("data-i18n", option_key)
    });
    [
        label(key),
        Element::new("select")
            .id(field.id())
            .value(value)
            .with_children(options),
    ]
}

/// Builds the page with form values taken from `render` or the built-in defaults.
pub fn qr_studio_page(render: &RenderConfig) -> Document {
    let ec = render.error_correction.unwrap_or_default();
    let style = render.border_style.unwrap_or_default();

    let header = Element::new("header")
        .with_child(Element::new("h1").tag("data-i18n", "app.title"))
        .with_child(Element::new("p").tag("data-i18n", "app.subtitle"))
        .with_child(
            Element::new("nav")
                .id("language-switch")
                .tag("data-i18n-aria", "language.label")
                .with_children(Language::ALL.map(|lang| {
                    Element::new("button")
                        .id(&format!("lang-{}", lang.code()))
                        .tag("data-lang-switch", lang.code())
                        .tag("data-i18n", &format!("language.{}", lang.code()))
                })),
        );

    let content = Element::new("fieldset")
        .id("content-section")
        .with_child(label("input.text.label"))
        .with_child(
            Element::new("textarea")
                .id(Field::Text.id())
                .tag("data-i18n-placeholder", "input.text.placeholder")
                .value(""),
        )
        .with_children(range(
            Field::Size,
            "input.size.label",
            QrSize::new(render.size.unwrap_or(DEFAULT_QR_SIZE_PX)).value(),
        ))
        .with_children(range(
            Field::Margin,
            "input.margin.label",
            Margin::new(render.margin.unwrap_or(DEFAULT_MARGIN_MODULES)).value(),
        ))
        .with_children(select(
            Field::ErrorCorrection,
            "input.errorCorrection.label",
            ec.as_str(),
            &[
                (ErrorCorrection::L.as_str(), "input.errorCorrection.low"),
                (ErrorCorrection::M.as_str(), "input.errorCorrection.medium"),
                (ErrorCorrection::Q.as_str(), "input.errorCorrection.quartile"),
                (ErrorCorrection::H.as_str(), "input.errorCorrection.high"),
            ],
        ))
        .with_children(color(
            Field::Foreground,
            "input.colors.foreground",
            render.foreground.clone().unwrap_or_else(|| DEFAULT_FOREGROUND.to_string()),
        ))
        .with_children(color(
            Field::Background,
            "input.colors.background",
            render.background.clone().unwrap_or_else(|| DEFAULT_BACKGROUND.to_string()),
        ));

    let border = Element::new("fieldset")
        .id("border-section")
        .with_child(Element::new("legend").tag("data-i18n", "border.section"))
        .with_children(select(
            Field::BorderStyle,
            "border.style",
            style.as_str(),
            &[
                (BorderStyle::None.as_str(), "border.styles.none"),
                (BorderStyle::Solid.as_str(), "border.styles.solid"),
                (BorderStyle::Dashed.as_str(), "border.styles.dashed"),
                (BorderStyle::Dotted.as_str(), "border.styles.dotted"),
                (BorderStyle::Double.as_str(), "border.styles.double"),
            ],
        ))
        .with_children(range(
            Field::BorderWidth,
            "border.width",
            BorderWidth::new(render.border_width.unwrap_or(DEFAULT_BORDER_WIDTH_PX)).value(),
        ))
        .with_children(range(
            Field::BorderRadius,
            "border.radius",
            BorderRadius::new(render.border_radius.unwrap_or(DEFAULT_BORDER_RADIUS_PX)).value(),
        ))
        .with_children(color(
            Field::BorderColor,
            "border.color",
            render.border_color.clone().unwrap_or_else(|| DEFAULT_BORDER_COLOR.to_string()),
        ))
        .with_child(label("border.shadow"))
        .with_child(
            Element::new("input")
                .id(Field::Shadow.id())
                .attr("type", "checkbox")
                .checked(render.shadow.unwrap_or(false)),
        );

    let icon = Element::new("fieldset")
        .id("icon-section")
        .with_child(Element::new("legend").tag("data-i18n", "icon.section"))
        .with_child(label("icon.upload"))
        .with_child(
            Element::new("input")
                .id(Field::IconUpload.id())
                .attr("type", "file")
                .tag("data-i18n-title", "icon.uploadTitle"),
        )
        .with_child(Element::new("div").id(ICON_PREVIEW))
        .with_children(range(
            Field::IconSize,
            "icon.size",
            IconPercent::new(render.icon_size.unwrap_or(DEFAULT_ICON_SIZE_PERCENT)).value(),
        ));

    let actions = Element::new("div")
        .id("actions")
        .with_child(
            Element::new("button")
                .id(GENERATE_BUTTON)
                .tag("data-i18n", "button.generate"),
        )
        .with_child(
            Element::new("button")
                .id(DOWNLOAD_BUTTON)
                .tag("data-i18n", "button.download")
                .tag("data-i18n-aria", "button.downloadAria")
                .disabled(true),
        );

    let preview = Element::new("section")
        .id("preview")
        .with_child(Element::new("canvas").id(CANVAS).class(HIDDEN_CLASS))
        .with_child(
            Element::new("p")
                .id(PLACEHOLDER)
                .tag("data-i18n", "preview.placeholder"),
        );

    Document::new(
        Element::new("body")
            .with_child(header)
            .with_child(
                Element::new("main")
                    .id("qr-form")
                    .with_child(content)
                    .with_child(border)
                    .with_child(icon)
                    .with_child(actions),
            )
            .with_child(preview),
    )
}
