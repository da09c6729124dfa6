//! Plain-text rendering of [`MonthlyCosts`].

use std::fmt;

use super::MonthlyCosts;

/// Format a currency value with two decimals and a `$` prefix.
///
/// # Examples
/// ```
/// use messbook::domain::format_amount;
///
/// assert_eq!(format_amount(12.5), "$12.50");
/// assert_eq!(format_amount(0.0), "$0.00");
/// ```
#[must_use]
pub fn format_amount(value: f64) -> String {
    // Adding +0.0 turns -0.0 into +0.0.
    let value = value + 0.0;
    format!("${value:.2}")
}

/// Calculation view of a month: a summary block then one block per member.
#[derive(Debug, Clone, Copy)]
pub struct MonthlyReport<'a> {
    costs: &'a MonthlyCosts,
}

impl<'a> MonthlyReport<'a> {
    /// Wrap computed costs for display.
    #[must_use]
    pub const fn new(costs: &'a MonthlyCosts) -> Self {
        Self { costs }
    }
}

impl fmt::Display for MonthlyReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let costs = self.costs;
        writeln!(f, "Monthly Summary for {}", costs.month)?;
        writeln!(f, "  Total Meal Cost: {}", format_amount(costs.total_cost))?;
        writeln!(f, "  Cost per Meal: {}", format_amount(costs.per_meal_cost))?;
        writeln!(f, "  Total Rent: {}", format_amount(costs.rent_cost))?;
        writeln!(f, "  Rent per Person: {}", format_amount(costs.per_person_rent))?;

        for member in &costs.member_costs {
            writeln!(f)?;
            writeln!(f, "{}", member.name)?;
            writeln!(f, "  Meals: {}", member.meal_count)?;
            writeln!(f, "  Meal Cost: {}", format_amount(member.meal_cost))?;
            let paid = if member.rent_paid { " (paid)" } else { "" };
            writeln!(f, "  Rent Share: {}{paid}", format_amount(member.rent_share))?;
            writeln!(f, "  Total: {}", format_amount(member.total_cost))?;
        }
        Ok(())
    }
}
