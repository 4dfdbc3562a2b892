pub mod icons;
pub mod stat_card;
pub mod transaction_form;
pub mod transaction_list;
