//! Fixed label set printed in the report.

pub const TITLE: &str = "Test Evidence Management System";

pub const SECTION_GENERAL: &str = "Informações Gerais";
pub const SECTION_SUMMARY: &str = "Resumo";
pub const SECTION_SCOPE: &str = "Escopo do Teste";
pub const SECTION_CASES: &str = "Casos de Teste";
pub const SECTION_NOTES: &str = "Considerações Finais";

pub const PRODUCT: &str = "Produto:";
pub const VERSION: &str = "Versão:";
pub const DATE: &str = "Data de Execução:";
pub const RESPONSIBLE: &str = "Responsável:";
pub const TEST_TYPE: &str = "Tipo de Teste:";
pub const ENVIRONMENT: &str = "Ambiente:";
pub const OS: &str = "Sistema Operacional:";
pub const BROWSER: &str = "Navegador:";
pub const DATABASE: &str = "Banco de Dados:";
pub const OBJECTIVE: &str = "Objetivo:";

pub const SUMMARY_TOTAL: &str = "Total de Casos:";
pub const SUMMARY_APPROVED: &str = "Aprovados:";
pub const SUMMARY_REJECTED: &str = "Reprovados:";
pub const SUMMARY_BLOCKED: &str = "Bloqueados:";
pub const SUMMARY_PENDING: &str = "Pendentes:";
pub const SUMMARY_COVERAGE: &str = "Cobertura:";

/// Labels drawn in the shaded cell of a two-column row
pub const ROW_LABELS: &[&str] = &[
    PRODUCT,
    VERSION,
    DATE,
    RESPONSIBLE,
    TEST_TYPE,
    ENVIRONMENT,
    OS,
    BROWSER,
    DATABASE,
    SUMMARY_TOTAL,
    SUMMARY_APPROVED,
    SUMMARY_REJECTED,
    SUMMARY_BLOCKED,
    SUMMARY_PENDING,
    SUMMARY_COVERAGE,
];

pub const CASE_TITLE: &str = "Caso de Teste";
pub const DESCRIPTION: &str = "Descrição:";
pub const EXPECTED_RESULT: &str = "Resultado Esperado:";
pub const ACTUAL_RESULT: &str = "Resultado Obtido:";
pub const EVIDENCES: &str = "Evidências:";

pub const STATUS_PENDING: &str = "Pendente";
pub const STATUS_APPROVED: &str = "Aprovado";
pub const STATUS_REJECTED: &str = "Reprovado";
pub const STATUS_BLOCKED: &str = "Bloqueado";
