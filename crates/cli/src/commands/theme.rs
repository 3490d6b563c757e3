//! Theme commands.

use infpro_core::Theme;

use super::Context;
use crate::console;

pub fn show(ctx: &Context) {
    console::print_lines(&[ctx.preferences().theme().to_string()]);
}

/// # Errors
///
/// Returns a storage error if the theme cannot be saved.
pub fn toggle(ctx: &Context) -> infpro_storefront::Result<()> {
    let theme = ctx.preferences().toggle_theme()?;
    console::print_lines(&[theme.to_string()]);
    Ok(())
}

/// # Errors
///
/// Returns a storage error if the theme cannot be saved.
pub fn set(ctx: &Context, theme: Theme) -> infpro_storefront::Result<()> {
    ctx.preferences().set_theme(theme)?;
    console::print_lines(&[theme.to_string()]);
    Ok(())
}
