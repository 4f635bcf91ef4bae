use clap::Subcommand;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use ledger_core::budgets::{BudgetListService, BudgetListServiceTrait};
use ledger_core::currencies::{CurrencyService, CurrencyServiceTrait};
use ledger_core::settings::ListingSettings;
use ledger_core::{PageRequest, Result, User};
use ledger_storage_memory::budgets::BudgetRepository;
use ledger_storage_memory::currencies::CurrencyRepository;
use ledger_storage_memory::MemoryStore;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List active currencies with the caller's default/enabled flags
    Currencies {
        #[arg(long)]
        page: Option<usize>,
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Show one currency, looked up by its path key
    Currency {
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// List the currencies enabled for the caller's group
    GroupCurrencies,
    /// Make a currency the default of the caller's group
    MakeDefault {
        #[arg(value_name = "CURRENCY_ID")]
        currency_id: i32,
    },
    /// List active budgets
    Budgets {
        #[arg(long)]
        page: Option<usize>,
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// List the limits of one budget
    BudgetLimits {
        #[arg(value_name = "BUDGET_ID")]
        budget_id: i32,
        #[arg(long)]
        page: Option<usize>,
        #[arg(long)]
        page_size: Option<usize>,
    },
}

impl Command {
    pub fn mutates(&self) -> bool {
        matches!(self, Command::MakeDefault { .. })
    }
}

pub struct Context {
    pub store: Arc<MemoryStore>,
    pub listing: ListingSettings,
    /// `None` when the caller runs anonymously
    pub user: Option<User>,
}

impl Context {
    fn currency_service(&self) -> CurrencyService {
        let repository = Arc::new(CurrencyRepository::new(self.store.clone()));
        CurrencyService::new(repository.clone(), repository)
    }

    fn budget_service(&self) -> BudgetListService {
        BudgetListService::new(
            Arc::new(BudgetRepository::new(self.store.clone())),
            self.listing.clone(),
        )
    }

    fn require_user(&self) -> Result<&User> {
        self.user.as_ref().ok_or_else(|| {
            ledger_core::Error::InvalidArgument("this command needs a user".to_string())
        })
    }

    fn page_request(&self, page: Option<usize>, page_size: Option<usize>) -> Result<PageRequest> {
        PageRequest::from_optional(page, page_size, &self.listing)
    }
}

pub async fn run(command: Command, ctx: &Context) -> Result<Value> {
    let value = match command {
        Command::Currencies { page, page_size } => {
            let request = ctx.page_request(page, page_size)?;
            let page = ctx
                .currency_service()
                .list_currencies(ctx.require_user()?, request)?;
            serde_json::to_value(page)?
        }
        Command::Currency { key } => {
            let view = ctx.currency_service().bind_route(&key, ctx.user.as_ref())?;
            serde_json::to_value(view)?
        }
        Command::GroupCurrencies => {
            let views = ctx
                .currency_service()
                .list_group_currencies(ctx.require_user()?)?;
            serde_json::to_value(views)?
        }
        Command::MakeDefault { currency_id } => {
            let user = ctx.require_user()?;
            let service = ctx.currency_service();
            service
                .make_group_default(user.user_group_id, currency_id)
                .await?;
            info!(
                "Group {} now defaults to currency {}",
                user.user_group_id, currency_id
            );
            serde_json::to_value(service.get_currency(user, currency_id)?)?
        }
        Command::Budgets { page, page_size } => {
            let request = ctx.page_request(page, page_size)?;
            serde_json::to_value(ctx.budget_service().list_budgets(request)?)?
        }
        Command::BudgetLimits {
            budget_id,
            page,
            page_size,
        } => {
            let request = ctx.page_request(page, page_size)?;
            serde_json::to_value(ctx.budget_service().list_budget_limits(budget_id, request)?)?
        }
    };
    Ok(value)
}
