//! Gamer Escape achievement pages (`GE:Achievement`).

use super::{GeneratedDocument, GeneratorOptions};
use crate::progress::Progress;
use crate::render::{Placeholders, normalize, render, zero_pad};
use crate::tables::{Row, Table, TableError, TableProvider, link_name, resolve, resolve_chain};
use std::sync::Arc;

/// Log target for this generator
const LOG_TARGET: &str = "    parser";

/// Patch label used when none is given.
pub const DEFAULT_PATCH: &str = "5.21";

/// Achievement pages are small; keep them in a single file.
const CHUNK_SIZE: usize = 9_999_999;

const ICON_WIDTH: usize = 6;

const TEMPLATE: &str = "{Top}{{ARR Infobox Achievement
| Index       = {index}
| Patch       = {patch}
| Name        = {name}
| Icon        = {icon}.png
| Category    = {category}
| Type        = {type}
| Achievement Points = {points}
| Achievement = {description}

| Achievement Reward-Items = {item}
| Male Title = {titleMale}
| Female Title = {titleFemale}

| Achievements Required for Reward = {achireq}

| Prior Achievement =
| Next Achievement  =
}}{Bottom}";

/// Class and job names linked in descriptions. Order matters and duplicates are
/// intentional: the second `monk` and `black mage` entries can never fire.
const JOB_LINKS: &[(&str, &str)] = &[
    ("gladiator", "[[Gladiator]]"),
    ("pugilist", "[[Pugilist]]"),
    ("marauder", "[[Marauder]]"),
    ("lancer", "[[Lancer]]"),
    ("archer", "[[Archer]]"),
    ("conjurer", "[[Conjurer]]"),
    ("thaumaturge", "[[Thaumaturge]]"),
    ("carpenter", "[[Carpenter]]"),
    ("blacksmith", "[[Blacksmith]]"),
    ("armorer", "[[Armorer]]"),
    ("goldsmith", "[[Goldsmith]]"),
    ("leatherworker", "[[Leatherworker]]"),
    ("weaver", "[[Weaver]]"),
    ("alchemist", "[[Alchemist]]"),
    ("culinarian", "[[Culinarian]]"),
    ("miner", "[[Miner]]"),
    ("botanist", "[[Botanist]]"),
    ("fisher", "[[Fisher]]"),
    ("paladin", "[[Paladin]]"),
    ("monk", "[[Monk]]"),
    ("monk", "[[Warrior]]"),
    ("dragoon", "[[Dragoon]]"),
    ("bard", "[[Bard]]"),
    ("white mage", "[[White Mage]]"),
    ("black mage", "[[Black Mage]]"),
    ("arcanist", "[[Arcanist]]"),
    ("summoner", "[[Summoner]]"),
    ("scholar", "[[Scholar]]"),
    ("rogue", "[[Rogue]]"),
    ("ninja", "[[Ninja]]"),
    ("machinist", "[[Machinist]]"),
    ("dark knight", "[[Dark Knight]]"),
    ("astrologian", "[[Astrologian]]"),
    ("samurai", "[[Samurai]]"),
    ("black mage", "[[Black Mage]]"),
    ("red mage", "[[Red Mage]]"),
    ("blue mage", "[[Blue Mage]]"),
    ("gunbreaker", "[[Gunbreaker]]"),
    ("dancer", "[[Dancer]]"),
];

/// Reference columns in the order their names are linked in the description.
const REFERENCE_COLUMNS: [&str; 9] = [
    "Key", "Data[0]", "Data[1]", "Data[2]", "Data[3]", "Data[4]", "Data[5]", "Data[6]", "Data[7]",
];

/// `Type` values whose `Key`/`Data[i]` columns point at other tables.
const TYPE_REQUIRED_ACHIEVEMENTS: u64 = 2;
const TYPE_QUESTS: u64 = 6;
const TYPE_ZONE: u64 = 8;

/// `Title` value meaning the achievement awards no title.
const NO_TITLE: &str = "0";

struct Tables<'a> {
    achievements: &'a Table,
    items: &'a Table,
    titles: &'a Table,
    place_names: &'a Table,
    quests: &'a Table,
    maps: &'a Table,
    categories: &'a Table,
    kinds: &'a Table,
}

async fn load<P: TableProvider>(provider: &mut P, progress: &dyn Progress, name: &str) -> Result<Arc<Table>, TableError> {
    progress.set_message(&format!("{name}.csv"));
    provider.table(name).await
}

pub async fn generate<P: TableProvider>(
    provider: &mut P,
    options: &GeneratorOptions,
    progress: &dyn Progress,
) -> Result<GeneratedDocument, TableError> {
    progress.set_phase("Loading");

    let achievements = load(provider, progress, "Achievement").await?;
    let items = load(provider, progress, "Item").await?;
    let titles = load(provider, progress, "Title").await?;
    let place_names = load(provider, progress, "PlaceName").await?;
    let quests = load(provider, progress, "Quest").await?;
    let maps = load(provider, progress, "Map").await?;
    let categories = load(provider, progress, "AchievementCategory").await?;
    let kinds = load(provider, progress, "AchievementKind").await?;

    let tables = Tables {
        achievements: &achievements,
        items: &items,
        titles: &titles,
        place_names: &place_names,
        quests: &quests,
        maps: &maps,
        categories: &categories,
        kinds: &kinds,
    };

    progress.set_phase("Rendering");
    progress.set_length(achievements.total() as u64);

    let mut records = Vec::with_capacity(achievements.total());
    for (id, row) in achievements.data() {
        records.push(render_page(id, row, &tables, options)?);
        progress.advance();
    }

    progress.done();
    log::info!(target: LOG_TARGET, "Rendered {} achievement pages for patch {}", records.len(), options.patch);

    Ok(GeneratedDocument {
        filename: format!("GeAchievementWiki - {}.txt", options.patch),
        records,
        chunk_size: CHUNK_SIZE,
    })
}

fn render_page(id: u64, row: &Row, tables: &Tables<'_>, options: &GeneratorOptions) -> Result<String, TableError> {
    let name = row.field("Name")?;
    let mut description = normalize(row.field("Description")?, JOB_LINKS);
    let mut required = Vec::new();

    match row.field("Type")?.trim().parse::<u64>().ok() {
        Some(TYPE_QUESTS) => {
            for column in REFERENCE_COLUMNS {
                let quest = resolve(row, column, tables.quests)?;
                description = link_name(&description, quest.field("Name")?).into_owned();
            }
        }
        Some(TYPE_REQUIRED_ACHIEVEMENTS) => {
            for (index, column) in REFERENCE_COLUMNS.into_iter().enumerate() {
                let required_name = resolve(row, column, tables.achievements)?.field("Name")?;
                description = link_name(&description, required_name).into_owned();

                // the Key achievement is always listed, Data[i] ones only when they exist
                if index == 0 || !required_name.is_empty() {
                    required.push(required_name);
                }
            }
        }
        Some(TYPE_ZONE) => {
            let place = resolve_chain(row, &[("Key", tables.maps), ("PlaceName", tables.place_names)])?;
            description = link_name(&description, place.field("Name")?).into_owned();
        }
        _ => {}
    }

    let (title_male, title_female) = if row.field("Title")?.trim() == NO_TITLE {
        ("", "")
    } else {
        let title = resolve(row, "Title", tables.titles)?;
        (title.field("Masculine")?, title.field("Feminine")?)
    };

    let item = resolve(row, "Item", tables.items)?.field("Name")?;
    let icon = zero_pad(row.integer("Icon")?, ICON_WIDTH);

    let category_row = resolve(row, "AchievementCategory", tables.categories)?;
    let kind = resolve(category_row, "AchievementKind", tables.kinds)?.field("Name")?;

    let (top, bottom) = page_frame(name, &options.patch, options.bot);

    let placeholders = Placeholders::new()
        .with("Top", top)
        .with("index", id.to_string())
        .with("patch", options.patch.as_str())
        .with("name", name)
        .with("item", item)
        .with("icon", icon)
        .with("points", row.field("Points")?)
        .with("description", description)
        .with("titleMale", title_male)
        .with("titleFemale", title_female)
        .with("type", category_row.field("Name")?)
        .with("category", kind)
        .with("achireq", required.join(" ,"))
        .with("Bottom", bottom);

    Ok(render(TEMPLATE, &placeholders))
}

/// Text placed before and after the infobox.
///
/// Bot pages carry pywikibot markers and a `/Patch` subpage; manual pages are
/// preceded by the edit links for both pages.
fn page_frame(name: &str, patch: &str, bot: bool) -> (String, &'static str) {
    if bot {
        (
            format!("{{{{-start-}}}}\n'''{name}/Patch'''\n{patch}\n{{{{-stop-}}}}{{{{-start-}}}}\n'''{name}'''\n"),
            "{{-stop-}}",
        )
    } else {
        (
            format!("http://ffxiv.gamerescape.com/wiki/{name}/Patch?action=edit\n{patch}\nhttp://ffxiv.gamerescape.com/wiki/{name}?action=edit\n"),
            "",
        )
    }
}
