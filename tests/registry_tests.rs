//! Theme and widget library resolution through a loaded configuration


use std::collections::HashMap;
use std::sync::Arc;
use test_utils::{StubFetcher, TestEnv};
use xsolla_utils::{
    lookup, merge_theme_parameters, resolve, Color, Config, FontInfo, GenericWrapper,
    ThemeParameters, WidgetClass, XsollaContext,
};

const CONFIG: &str = r##"
[ui_builder]
interface_theme = "dark"
widgets_library = "fancy"

[themes.dark.colors]
Main = "#000000"
Accent = "#FF005B"

[themes.dark.fonts.MainBold]
family = "Inter"
typeface = "Bold"
size = 18

[themes.dark.brushes.MainButtonInitial]
draw = "roundedbox"
tint = "#FF005B"
corner_radius = 8

[themes.light.colors]
Main = "#FFFFFF"

[widget_libraries.fancy.widgets]
Button = "W_FancyButton"
"##;

fn context(env: &TestEnv) -> XsollaContext {
    env.write_config(CONFIG);
    let config = Config::load_from(env.config_path()).unwrap();
    XsollaContext::with_fetcher(config, Arc::new(StubFetcher::new()))
}

#[test]
fn test_resolve_from_configured_theme() {
    let env = TestEnv::new();
    let ctx = context(&env);

    assert_eq!(ctx.color("Main"), Color::rgb(0, 0, 0));
    assert_eq!(ctx.color("Accent"), Color::rgb(0xFF, 0x00, 0x5B));
    assert_eq!(ctx.font("MainBold"), FontInfo::new("Inter", "Bold", 18));
    assert_eq!(ctx.brush("MainButtonInitial").corner_radius, 8);

    // Misses are silent and give the zero value
    assert_eq!(ctx.color("Inactive"), Color::default());
    assert!(ctx.font("MainRegular").is_empty());
}

#[test]
fn test_widget_classes() {
    let env = TestEnv::new();
    let ctx = context(&env);

    assert_eq!(ctx.widget_class("Button"), Some(WidgetClass::new("W_FancyButton")));
    assert_eq!(ctx.widget_class("Checkbox"), None);

    // Configured libraries replace the built-in ones
    assert!(ctx.widgets_library(Some("default")).is_none());
    assert_eq!(ctx.widgets_library_ids(), vec!["fancy"]);

    ctx.update_widgets_library(None);
    assert_eq!(ctx.widget_class("Button"), None);
}

#[test]
fn test_switching_theme_at_runtime() {
    let env = TestEnv::new();
    let ctx = context(&env);
    let mut wrapper = GenericWrapper::new("Button");
    wrapper.bind(&ctx);

    ctx.update_theme(Some("light"));
    assert!(wrapper.take_theme_change());
    assert_eq!(ctx.color("Main"), Color::WHITE);
    assert_eq!(ctx.color("Accent"), Color::default());

    ctx.update_theme(Some("nonexistent"));
    assert!(ctx.current_theme().is_none());
    assert_eq!(ctx.color("Main"), Color::default());
}

#[test]
fn test_theme_instances_are_shared() {
    let env = TestEnv::new();
    let ctx = context(&env);

    let a = ctx.theme(Some("light")).unwrap();
    ctx.update_theme(Some("light"));
    let b = ctx.current_theme().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(b.id, "light");
}

#[test]
fn test_wrapper_parameters_resolve_through_its_theme() {
    let env = TestEnv::new();
    let ctx = context(&env);

    let mut parameters = ThemeParameters::default();
    parameters
        .colors
        .insert("Background".to_string(), "Main".to_string());

    let wrapper = GenericWrapper::new("Button")
        .with_theme("light")
        .with_parameters(parameters);
    let theme = wrapper.effective_theme(&ctx);

    assert_eq!(
        wrapper.parameters.color(theme.as_deref(), "Background"),
        Color::WHITE
    );
    assert_eq!(
        wrapper.widget_class(ctx.current_widgets_library().as_deref()),
        Some(WidgetClass::new("W_FancyButton"))
    );
}

#[test]
fn test_wrapper_parameter_updates() {
    let mut wrapper = GenericWrapper::new("Button");

    let mut first = ThemeParameters::default();
    first.colors.insert("a".to_string(), "1".to_string());
    first.colors.insert("b".to_string(), "2".to_string());
    wrapper.update_theme_parameters(&first);
    assert_eq!(wrapper.parameters, first);

    let mut known = ThemeParameters::default();
    known.colors.insert("a".to_string(), "changed".to_string());
    wrapper.update_theme_parameters(&known);
    assert_eq!(wrapper.parameters, first);

    wrapper.update_theme_parameters(&ThemeParameters::default());
    assert!(wrapper.parameters.is_empty());

    assert_eq!(merge_theme_parameters(&ThemeParameters::default(), &first), first);
}

#[test]
fn test_type_slots_from_configuration() {
    let env = TestEnv::new();
    env.write_config(&format!(
        r#"{}
[[ui_builder.color_types]]
slot = 1
name = "Accent"

[[ui_builder.color_types]]
slot = 0
name = "Ignored"

[[ui_builder.widget_types]]
slot = 4
name = "Button"
"#,
        CONFIG
    ));
    let config = Config::load_from(env.config_path()).unwrap();
    let ctx = XsollaContext::with_fetcher(config, Arc::new(StubFetcher::new()));

    assert_eq!(ctx.color_by_type(1), Some(Color::rgb(0xFF, 0x00, 0x5B)));
    assert_eq!(ctx.color_by_type(0), None);
    assert_eq!(ctx.color_by_type(2), None);
    assert_eq!(ctx.font_by_type(1), Some(FontInfo::new("Inter", "Bold", 18)));
    assert_eq!(ctx.widget_class_by_type(4), Some(WidgetClass::new("W_FancyButton")));
    assert_eq!(ctx.widget_class_by_type(1), None);

    let wrapper = GenericWrapper::for_slot(4);
    assert_eq!(
        ctx.wrapper_widget_class(&wrapper),
        Some(WidgetClass::new("W_FancyButton"))
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Slot {
    Header,
    Footer,
}

#[test]
fn test_enum_keyed_registry() {
    let mut registry = HashMap::new();
    registry.insert(Slot::Header, Color::rgb(1, 2, 3));

    assert_eq!(resolve(Some(&registry), &Slot::Header), Color::rgb(1, 2, 3));
    assert_eq!(resolve(Some(&registry), &Slot::Footer), Color::default());
    assert_eq!(resolve::<HashMap<Slot, Color>, _, _>(None, &Slot::Header), Color::default());
    assert_eq!(lookup(Some(&registry), &Slot::Footer), None::<Color>);
}

#[test]
fn test_invalid_selection_is_rejected() {
    let env = TestEnv::new();
    env.write_config("[ui_builder]\ninterface_theme = \"missing\"\n");

    let err = Config::load_from(env.config_path()).unwrap_err();
    assert!(err.to_string().contains("unknown theme 'missing'"));
}
