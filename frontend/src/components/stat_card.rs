use yew::prelude::*;

use super::icons::{icon_arrow_up_right, icon_credit_card, icon_wallet};
use crate::money::format_currency;

#[derive(Clone, Copy, PartialEq)]
pub enum StatIcon {
    UpRight,
    CreditCard,
    Wallet,
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: &'static str,
    pub amount: i64,
    pub icon: StatIcon,
    /// Show negative amounts in the danger colour.
    #[prop_or_default]
    pub flag_negative: bool,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    let amount_class = if props.flag_negative && props.amount < 0 {
        "text-2xl font-semibold text-red-600 tracking-tight"
    } else {
        "text-2xl font-semibold text-slate-900 tracking-tight"
    };

    html! {
        <div class="bg-white p-5 rounded-xl shadow-sm border border-slate-100 flex justify-between items-start">
            <div>
                <p class="text-xs font-medium text-slate-500 uppercase tracking-wide mb-2">{ props.title }</p>
                <h3 class={amount_class}>{ format_currency(props.amount) }</h3>
            </div>
            <div class="p-3 bg-slate-50 rounded-xl">
                {
                    match props.icon {
                        StatIcon::UpRight => icon_arrow_up_right(),
                        StatIcon::CreditCard => icon_credit_card(),
                        StatIcon::Wallet => icon_wallet(),
                    }
                }
            </div>
        </div>
    }
}
