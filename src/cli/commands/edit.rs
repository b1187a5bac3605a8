use chrono::Utc;

use crate::config::Config;
use crate::db::Store;
use crate::models::model_record::BaseModel;

pub struct EditArgs {
    pub name: Option<String>,
    pub base_model: Option<String>,
    pub weight: Option<f32>,
    pub steps: Option<String>,
    pub cfg: Option<String>,
    pub notes: Option<String>,
}

impl EditArgs {
    const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.base_model.is_none()
            && self.weight.is_none()
            && self.steps.is_none()
            && self.cfg.is_none()
            && self.notes.is_none()
    }
}

pub async fn cmd_edit_model(config: &Config, id: i64, args: EditArgs) -> anyhow::Result<()> {
    if args.is_empty() {
        println!("Nothing to change. Pass at least one field flag, e.g. --weight 0.8");
        return Ok(());
    }

    let store = Store::new(&config.general.database_path).await?;

    let Some(mut model) = store.get_model(id).await? else {
        println!("Model with ID {id} not found in the catalog.");
        return Ok(());
    };

    if let Some(name) = args.name {
        model.name = name;
    }
    if let Some(raw) = args.base_model {
        model.base_model = BaseModel::from_source(&raw);
    }
    if let Some(weight) = args.weight {
        model.recommended_weight = Some(weight);
    }
    if let Some(steps) = args.steps {
        model.recommended_steps = Some(steps);
    }
    if let Some(cfg) = args.cfg {
        model.cfg_scale = Some(cfg);
    }
    if let Some(notes) = args.notes {
        model.personal_notes = Some(notes);
    }

    model.updated_at = Some(Utc::now().to_rfc3339());
    store.update_model(&model).await?;

    println!("✓ Updated: {} (ID: {})", model.name, model.id);

    Ok(())
}
