use crate::cli::commands::{authorize, open_pool};
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::recalc::RecalcLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::format_amount;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    authorize(cli, cfg, "recalc")?;

    let mut pool = open_pool(cfg)?;
    let result = RecalcLogic::run(&mut pool)?;

    success(format!(
        "Balances recomputed for {} player(s), {} adjustment(s), total {}",
        result.balances.len(),
        result.adjustments.len(),
        format_amount(result.total(), &cfg.currency_symbol, false)
    ));
    RecalcLogic::report(&result);
    Ok(())
}
