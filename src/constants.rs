//! Centralized constants for user-facing prompt text and generated-code fragments.

/// Title of the assertion pick list.
/// Placeholders: {selector}
pub const PICK_TITLE_TEMPLATE: &str = "Please select an assert type for {selector}";

/// Placeholder text shown inside the assertion pick list.
pub const PICK_PLACEHOLDER: &str = "Select an assert type";

/// Fallback title of the value input box when the picked assertion has none of its own.
/// Placeholders: {selector}
pub const INPUT_TITLE_TEMPLATE: &str = "please input assert value for {selector}";

/// Prompt line shown under the value input box.
pub const INPUT_PROMPT: &str = "Please input something";

/// Title of the category pick list.
pub const CATEGORY_PICK_TITLE: &str = "Please select an assert category";

/// Placeholder text shown inside the category pick list.
pub const CATEGORY_PICK_PLACEHOLDER: &str = "Select an assert category";

/// CSS selector of an open ant-design select dropdown.
pub const ANT_DROPDOWN_SELECTOR: &str = ".ant-select-dropdown:not(.ant-select-dropdown-hidden)";

/// CSS selector of the label element of every selected option inside an ant-design dropdown.
pub const ANT_SELECTED_OPTION_SELECTOR: &str =
    r#".ant-select-item-option[aria-selected="true"] > .ant-select-item-option-content"#;

/// Separators accepted between expected labels: ASCII comma and full-width comma.
pub const LABEL_SEPARATORS: [char; 2] = [',', '，'];

/// Default snapshot name offered in the screenshot input box.
pub const DEFAULT_SNAPSHOT_NAME: &str = "screenshot";

/// Inline check that an ant-design select shows every expected label.
/// Placeholders: {selector}, {settle_ms}, {timeout_ms}, {dropdown}, {option}, {value}
pub const SELECTED_LABEL_TEMPLATE: &str = "
    /** assert selected labels of the select: start ***/
    {
      await page.{selector}?.click();
      // let a previously opened dropdown close before reading this one
      await page.waitForTimeout({settle_ms});
      let dropdown = await page.waitForSelector('{dropdown}', {timeout:{timeout_ms}})
                    .catch(() => {
                        console.log('dropdown did not appear, clicking the select again');
                        return page.{selector}?.click().then(() => page.waitForSelector('{dropdown}'));
                    });
      let values = await dropdown.$$eval('{option}',
          options => options.map(option => option?.textContent?.trim())
      );
      console.log('selected labels in dropdown:', values);
      let inputValue = '{value}';
      let inputOptions = inputValue.split(/[,，]/).map(item => item.trim());
      // every expected label must be part of some selected label
      let result = inputOptions.every((itemA) =>
          values.some((itemB) => itemB?.indexOf(itemA) !== -1)
      );
      expect(result).toBe(true);
    }
    /** assert selected labels of the select: end ***/

    ";

/// Visual comparison against a stored reference image.
/// Placeholders: {selector}, {file_name}, {file_literal}, {ratio}
pub const SCREENSHOT_TEMPLATE: &str = "// Compare the element with the reference screenshot {file_name}.
// The first run records the reference image; later runs fail when more than
// maxDiffPixelRatio of the pixels differ. Refresh it with --update-snapshots.
await expect(page.{selector}).toHaveScreenshot({file_literal}, { maxDiffPixelRatio: {ratio} });";

/// Substitute `{selector}` in one of the title templates above.
pub fn with_selector(template: &str, selector: &str) -> String {
    template.replace("{selector}", selector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_selector_substitutes_locator() {
        assert_eq!(
            with_selector(PICK_TITLE_TEMPLATE, "getByRole('button')"),
            "Please select an assert type for getByRole('button')"
        );
        assert_eq!(
            with_selector(INPUT_TITLE_TEMPLATE, "locator('#name')"),
            "please input assert value for locator('#name')"
        );
    }
}
