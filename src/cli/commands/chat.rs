use anyhow::Result;

use super::config_manager;
use super::translate::build_translator;
use crate::agent::{HumanAgent, HumanOptions, InputTranslation};
use crate::bot::ConfiguredBot;
use crate::candidates::load_candidates;
use crate::cli::{ChatArgs, GlobalArgs};
use crate::config::{ResolveOptions, describe_bot, resolve_config};
use crate::console::{self, Console};
use crate::dictionary::Dictionary;
use crate::message::DisplayOptions;
use crate::translation::{CachedTranslator, RemoteTranslator};
use crate::world::DialogueWorld;
use crate::{info, status};

type TerminalHuman = HumanAgent<Box<dyn Console>, CachedTranslator<RemoteTranslator>>;

pub async fn run_chat(args: &ChatArgs, global: &GlobalArgs) -> Result<()> {
    let config_file = config_manager(global)?.load_or_default()?;
    let resolved = resolve_config(&resolve_options(args), &config_file)?;

    let candidates = load_candidates(resolved.candidates_file.as_deref())?;
    if let Some(candidates) = &candidates {
        status!("Loaded {} label candidates", candidates.len());
    }

    let options = HumanOptions {
        single_turn: resolved.single_turn,
        candidates,
        display: DisplayOptions {
            add_fields: args.display_fields.clone(),
            verbose: global.verbose,
        },
    };

    let mut human: TerminalHuman = HumanAgent::new(console::terminal(), options);

    if resolved.translate {
        let dictionary = Dictionary::load(resolved.id_file_path.as_deref())?;
        status!("Loaded {} dictionary phrases", dictionary.len());

        let translator = build_translator(&resolved.translator, args.no_cache)?;
        human = human.with_translation(InputTranslation::new(dictionary, translator));
    }

    info!("{}", describe_bot(&resolved.bot));
    human.print_instructions()?;

    let bot = ConfiguredBot::from_settings(&resolved.bot);
    let mut world = DialogueWorld::new(human, bot, resolved.greeting);
    world.run().await?;

    status!(
        "{} turns, {} episodes finished",
        world.total_turns(),
        world.episodes()
    );
    Ok(())
}

fn resolve_options(args: &ChatArgs) -> ResolveOptions {
    ResolveOptions {
        provider: args.provider.clone(),
        model: args.model.clone(),
        candidates_file: args.candidates_file.clone(),
        id_file_path: args.id_file_path.clone(),
        single_turn: args.single_turn,
        translate: args.translate,
    }
}
