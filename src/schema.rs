//! Field schema: the column display names each entity reads.
//!
//! A column lists every display name it is published under. The first name
//! is the canonical one; the rest are spellings found in older reports.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub names: &'static [&'static str],
}

impl Column {
    const fn new(names: &'static [&'static str]) -> Self {
        Self { names }
    }

    pub fn name(&self) -> &'static str {
        self.names[0]
    }
}

pub const REPORTING_YEAR: Column = Column::new(&["Ano"]);

// Rigs
pub const RIG_CODE: Column = Column::new(&["Sonda"]);
pub const RIG_NAME: Column = Column::new(&["Nome da Sonda"]);
pub const RIG_TOTAL_CAPACITY: Column = Column::new(&["Capacidade Total"]);
pub const RIG_CURRENT_CAPACITY: Column = Column::new(&["Capacidade Atual"]);
pub const RIG_POSITIONING: Column = Column::new(&["Posicionamento"]);

pub const RIG_COLUMNS: &[&Column] = &[
    &RIG_CODE,
    &RIG_NAME,
    &RIG_TOTAL_CAPACITY,
    &RIG_CURRENT_CAPACITY,
    &RIG_POSITIONING,
];

// Services
pub const PROJECT: Column = Column::new(&["Projeto"]);
pub const SITE: Column = Column::new(&["Locação"]);
pub const WELL: Column = Column::new(&["Poço"]);
pub const START_DATE: Column = Column::new(&["Data de Início"]);
pub const END_DATE: Column = Column::new(&["Data de Término"]);
pub const DURATION: Column = Column::new(&["Duração"]);
pub const SERVICE_TYPE: Column = Column::new(&["Tipo Serviço", "Tipo de Serviço"]);
pub const DESCRIPTION: Column = Column::new(&["Descrição"]);

pub const GENERALIST_NAME: Column = Column::new(&["Projetista PROJ"]);
pub const GENERALIST_EVALUATED: Column =
    Column::new(&["Avaliaçao Generalista", "Avaliação Generalista"]);
pub const GENERALIST_APPLIED: Column = Column::new(&["Avaliação Generalista Utilizada"]);
pub const GENERALIST_NOTES: Column = Column::new(&["Observação Generalista"]);

pub const SPECIALIST_NAME: Column = Column::new(&["Projetista PEP"]);
pub const SPECIALIST_EVALUATED: Column =
    Column::new(&["Avaliaçao Especialista", "Avaliação Especialista"]);
pub const SPECIALIST_APPLIED: Column = Column::new(&["Avaliação Especialista Utilizada"]);
pub const SPECIALIST_NOTES: Column =
    Column::new(&["Observação Especialista", "Observação especialista"]);

pub const INVENTORY_VALUE: Column = Column::new(&["Valor estoque", "Valor do Estoque"]);

pub const PROPOSAL: Column = Column::new(&["Proposta"]);
pub const OBSTACLES: Column = Column::new(&["Obstaculos"]);
pub const LESSONS: Column = Column::new(&["Lições aprendidas"]);
pub const EXPECTED_RESULT: Column = Column::new(&["Resultado esperado"]);
pub const OBTAINED_RESULT: Column = Column::new(&["Resultado obtido"]);
pub const CHECKED_BY: Column = Column::new(&["Checado por"]);

pub const SERVICE_COLUMNS: &[&Column] = &[
    &RIG_CODE,
    &RIG_NAME,
    &PROJECT,
    &SITE,
    &WELL,
    &START_DATE,
    &END_DATE,
    &DURATION,
    &SERVICE_TYPE,
    &DESCRIPTION,
    &GENERALIST_NAME,
    &GENERALIST_EVALUATED,
    &GENERALIST_APPLIED,
    &GENERALIST_NOTES,
    &SPECIALIST_NAME,
    &SPECIALIST_EVALUATED,
    &SPECIALIST_APPLIED,
    &SPECIALIST_NOTES,
    &INVENTORY_VALUE,
    &PROPOSAL,
    &OBSTACLES,
    &LESSONS,
    &EXPECTED_RESULT,
    &OBTAINED_RESULT,
    &CHECKED_BY,
];

// Re-evaluation report
pub const TASK_TYPE: Column = Column::new(&["Tipo Tarefa"]);
pub const REPORT_SERVICE_TYPE: Column = Column::new(&["Tipo de Serviço", "Tipo Serviço"]);
pub const REPORT_INVENTORY_VALUE: Column = Column::new(&["Valor do Estoque", "Valor estoque"]);

pub const REEVALUATION_COLUMNS: &[&Column] = &[
    &RIG_CODE,
    &WELL,
    &SITE,
    &GENERALIST_NAME,
    &SPECIALIST_NAME,
    &REPORT_SERVICE_TYPE,
    &TASK_TYPE,
    &DESCRIPTION,
    &GENERALIST_NOTES,
    &GENERALIST_APPLIED,
    &SPECIALIST_NOTES,
    &SPECIALIST_APPLIED,
    &REPORT_INVENTORY_VALUE,
];

// Goals
pub const GOAL_TITLE: Column = Column::new(&["Nome da Meta", "Titulo"]);
pub const GOAL_SCORE: Column = Column::new(&["Nota da Meta"]);
pub const GOAL_DETAIL: Column = Column::new(&["Anotações"]);
pub const GOAL_SECTOR: Column = Column::new(&["Setor"]);
pub const GOAL_ASSIGNEE: Column = Column::new(&["Projetistas", "Atribuido a"]);
pub const GOAL_PRIORITY: Column = Column::new(&["Prioridade"]);
pub const GOAL_PROGRESS: Column = Column::new(&["Progresso"]);

pub const GOAL_COLUMNS: &[&Column] = &[
    &GOAL_TITLE,
    &GOAL_SCORE,
    &GOAL_DETAIL,
    &GOAL_SECTOR,
    &GOAL_ASSIGNEE,
    &GOAL_PRIORITY,
    &GOAL_PROGRESS,
];

// Timeline
pub const PHASE: Column = Column::new(&["Fase"]);
pub const PHASE_START: Column = Column::new(&["Início da Fase"]);
pub const PHASE_END: Column = Column::new(&["Término da Fase"]);
pub const MILESTONE_PROJECT: Column = Column::new(&["Projeto do Marco"]);
pub const MILESTONE: Column = Column::new(&["Marco"]);
pub const MILESTONE_DATE: Column = Column::new(&["Data do Marco"]);
pub const WINDOW_START: Column = Column::new(&["Data Inicial"]);
pub const WINDOW_END: Column = Column::new(&["Data Final"]);

pub const TIMELINE_COLUMNS: &[&Column] = &[
    &PROJECT,
    &PHASE,
    &PHASE_START,
    &PHASE_END,
    &MILESTONE_PROJECT,
    &MILESTONE,
    &MILESTONE_DATE,
    &WINDOW_START,
    &WINDOW_END,
];
