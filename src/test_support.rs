//! Shared fixtures for unit tests.

use crate::catalog::{
    domain::{
        ActionBlock, ActionLink, ActionLinkKind, CatalogDocument, City, CityId,
        DocumentChecklistItem, Importance, JourneyPhase, ModuleInfo, PersonaId, PhaseId, Subtask,
        SubtaskId, SubtaskKind, Task, TaskDefinition, TaskId, TaskModule, TaskTemplate,
        TemplatePurpose,
    },
    services::{CatalogConfig, CatalogService},
};
use crate::progress::domain::{RecordUpdate, TaskStatus, UserId, UserTaskRecord};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub(crate) fn at_noon(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).expect("valid time of day");
        Self(Utc.from_utc_datetime(&noon))
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

pub(crate) fn task_id(value: &str) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

pub(crate) fn subtask_id(value: &str) -> SubtaskId {
    SubtaskId::new(value).expect("valid subtask id")
}

pub(crate) fn phase_id(value: &str) -> PhaseId {
    PhaseId::new(value).expect("valid phase id")
}

pub(crate) fn city_id(value: &str) -> CityId {
    CityId::new(value).expect("valid city id")
}

pub(crate) fn persona_id(value: &str) -> PersonaId {
    PersonaId::new(value).expect("valid persona id")
}

pub(crate) fn task(
    id: &str,
    module: TaskModule,
    phase: &str,
    importance: Importance,
) -> Task {
    Task::new(TaskDefinition {
        id: task_id(id),
        title: format!("{id} title"),
        description: format!("{id} description"),
        module,
        phase: phase_id(phase),
        importance,
    })
}

pub(crate) fn journey_phases() -> Vec<JourneyPhase> {
    vec![
        JourneyPhase::new(phase_id("week_1"), 1, 0, Some(7)),
        JourneyPhase::new(phase_id("pre_arrival"), 0, -90, Some(-1)),
        JourneyPhase::new(phase_id("month_1"), 2, 8, Some(30)),
        JourneyPhase::new(phase_id("month_3"), 3, 31, Some(90)),
        JourneyPhase::new(phase_id("later"), 4, 91, None),
    ]
}

/// Four-task relocation catalog with Berlin and Munich registered.
///
/// `anmeldung` depends on `find-housing` and links to it through a
/// subtask; `open-bank-account` depends on `anmeldung`. Both housing and
/// registration carry action blocks.
pub(crate) fn relocation_document() -> CatalogDocument {
    let find_housing = task(
        "find-housing",
        TaskModule::Housing,
        "pre_arrival",
        Importance::Critical,
    )
    .with_city_note("Berlin rents rise quickly")
    .with_subtasks([
        Subtask::new(
            subtask_id("define_budget"),
            "Define your budget",
            SubtaskKind::FormCriteria {
                criteria_key: "housing_criteria".to_owned(),
                fields: vec!["budget".to_owned(), "district".to_owned()],
            },
        )
        .required(),
        Subtask::new(
            subtask_id("platform_signup"),
            "Sign up on a platform",
            SubtaskKind::ExternalAction {
                action_type: "platform_signup".to_owned(),
                providers: vec!["wg_gesucht".to_owned(), "immoscout".to_owned()],
            },
        )
        .required(),
    ]);

    let anmeldung = task(
        "anmeldung",
        TaskModule::Bureaucracy,
        "week_1",
        Importance::Critical,
    )
    .with_city_scope([city_id("berlin")])
    .with_dependencies([task_id("find-housing")])
    .with_subtasks([
        Subtask::new(
            subtask_id("book_appointment"),
            "Book an appointment",
            SubtaskKind::Simple,
        )
        .required(),
        Subtask::new(
            subtask_id("have_address"),
            "Have an address",
            SubtaskKind::LinkedTask {
                linked_task_id: task_id("find-housing"),
            },
        )
        .required(),
    ]);

    let open_bank_account = task(
        "open-bank-account",
        TaskModule::Bureaucracy,
        "week_1",
        Importance::High,
    )
    .with_dependencies([task_id("anmeldung")])
    .with_subtasks([Subtask::new(
        subtask_id("compare_banks"),
        "Compare banks",
        SubtaskKind::Simple,
    )]);

    let join_community = task(
        "join-community",
        TaskModule::Social,
        "month_1",
        Importance::Recommended,
    )
    .with_personas([persona_id("student")]);

    CatalogDocument {
        journey_phases: journey_phases(),
        tasks: vec![find_housing, anmeldung, open_bank_account, join_community],
        cities: vec![
            City::new(city_id("berlin"), "Berlin"),
            City::new(city_id("munich"), "München"),
        ],
        modules: vec![
            ModuleInfo::new(TaskModule::Housing, "Konut"),
            ModuleInfo::new(TaskModule::Bureaucracy, "Bürokrasi"),
        ],
        action_blocks: relocation_action_blocks(),
    }
}

pub(crate) fn relocation_action_blocks() -> BTreeMap<TaskId, ActionBlock> {
    let registration = ActionBlock::new()
        .with_action_links([
            ActionLink::new(
                "service_berlin",
                "Service-Portal Berlin",
                "https://service.berlin.de",
                ActionLinkKind::Official,
            )
            .with_city_scope([city_id("berlin")]),
            ActionLink::new(
                "anmeldung_guide",
                "Anmeldung guide",
                "https://example.org/anmeldung",
                ActionLinkKind::Info,
            ),
        ])
        .with_document_checklist([
            DocumentChecklistItem::new("passport", "Passport"),
            DocumentChecklistItem::new("rental_contract", "Rental contract"),
        ]);
    let housing = ActionBlock::new().with_templates([TaskTemplate::new(
        "landlord_intro",
        "Landlord introduction",
        TemplatePurpose::Housing,
        "housing_landlord_intro",
    )]);
    BTreeMap::from([
        (task_id("anmeldung"), registration),
        (task_id("find-housing"), housing),
    ])
}

pub(crate) fn catalog_service(clock: FixedClock) -> CatalogService<FixedClock> {
    CatalogService::from_parts(
        relocation_document(),
        HashMap::new(),
        CatalogConfig::default(),
        Arc::new(clock),
    )
    .expect("relocation catalog is valid")
}

pub(crate) fn record(user_id: UserId, id: &str, status: TaskStatus) -> UserTaskRecord {
    let now = FixedClock::at_noon(date(2026, 3, 1)).utc();
    let mut record = UserTaskRecord::new(user_id, task_id(id), now);
    record.apply(RecordUpdate::new().with_status(status), now);
    record
}
