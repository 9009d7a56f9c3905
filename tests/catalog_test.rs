use inspect_assert::catalog::{CATALOG, descriptors};
use inspect_assert::{AssertionKind, GeneratorConfig};

#[test]
fn test_catalog_declaration_order() {
    let labels: Vec<&str> = descriptors().iter().map(|d| d.label).collect();
    assert_eq!(
        labels,
        vec![
            "toContain",
            "not.toContain",
            "toHaveSelectedLabel",
            "toBeVisible",
            "toBeEditable",
            "toBeChecked",
            "not.toBeChecked",
            "toHaveValue",
            "toHaveScreenshot",
        ]
    );
}

#[test]
fn test_needs_value_flags() {
    let needing: Vec<&str> = CATALOG
        .iter()
        .filter(|d| d.needs_value)
        .map(|d| d.label)
        .collect();
    assert_eq!(
        needing,
        vec![
            "toContain",
            "not.toContain",
            "toHaveSelectedLabel",
            "toHaveValue",
            "toHaveScreenshot",
        ]
    );
}

#[test]
fn test_state_assertions_are_deterministic() {
    let config = GeneratorConfig::default();
    let expected = [
        (AssertionKind::Visible, "toBeVisible"),
        (AssertionKind::Editable, "toBeEditable"),
        (AssertionKind::Checked, "toBeChecked"),
        (AssertionKind::NotChecked, "not.toBeChecked"),
    ];
    for (kind, matcher) in expected {
        let first = kind.generate("getByRole('checkbox')", None, &config);
        assert_eq!(
            first,
            format!("await expect(await page.getByRole('checkbox')).{matcher}();")
        );
        assert_eq!(first, kind.generate("getByRole('checkbox')", Some("x"), &config));
    }
}

#[test]
fn test_text_assertions_embed_json_literal() {
    let descriptor = AssertionKind::ContainsText.descriptor();
    assert_eq!(
        descriptor.generate("getByText('Notice')", Some("it's ok")),
        r#"await expect(page.getByText('Notice')).toContainText("it's ok");"#
    );
    assert_eq!(
        AssertionKind::NotContainsText
            .descriptor()
            .generate("getByText('Notice')", Some("a \"quoted\"\\path")),
        r#"await expect(page.getByText('Notice')).not.toContainText("a \"quoted\"\\path");"#
    );
}

#[test]
fn test_screenshot_defaults() {
    let code = AssertionKind::Screenshot
        .descriptor()
        .generate("locator('#login')", Some("login"));
    assert!(code.contains("login.png"));
    assert!(code.contains("0.01"));
    assert!(code.lines().filter(|l| l.starts_with("//")).count() >= 2);
}

#[test]
fn test_selected_label_escapes_quotes() {
    let code = AssertionKind::HasSelectedLabel
        .descriptor()
        .generate("getByTestId('city')", Some("Xi'an"));
    assert!(code.contains(r"let inputValue = 'Xi\'an';"));
}
