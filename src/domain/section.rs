//! Navigation sections of the dashboard.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Dashboard,
    Fleet,
    Contracts,
    Finance,
    Risk,
    Penalties,
    Maintenance,
    Warehouse,
    Counterparties,
    Settings,
}

/// Static copy of a section that has no functionality yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SectionText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub heading: &'static str,
    pub body: &'static str,
}

impl Section {
    /// Sidebar order.
    pub const ALL: [Section; 10] = [
        Section::Dashboard,
        Section::Fleet,
        Section::Contracts,
        Section::Finance,
        Section::Risk,
        Section::Penalties,
        Section::Maintenance,
        Section::Warehouse,
        Section::Counterparties,
        Section::Settings,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Section::Dashboard => "/",
            Section::Fleet => "/fleet",
            Section::Contracts => "/contracts",
            Section::Finance => "/finance",
            Section::Risk => "/risk",
            Section::Penalties => "/penalties",
            Section::Maintenance => "/maintenance",
            Section::Warehouse => "/warehouse",
            Section::Counterparties => "/counterparties",
            Section::Settings => "/settings",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Section::Dashboard => "Дашборд",
            Section::Fleet => "Автопарк",
            Section::Contracts => "Договоры",
            Section::Finance => "Финансы",
            Section::Risk => "Риски",
            Section::Penalties => "Штрафы",
            Section::Maintenance => "ТО и ремонты",
            Section::Warehouse => "Склад",
            Section::Counterparties => "Контрагенты",
            Section::Settings => "Настройки",
        }
    }

    /// Bootstrap icon shown next to the sidebar label.
    pub const fn icon(self) -> &'static str {
        match self {
            Section::Dashboard => "bi-speedometer2",
            Section::Fleet => "bi-car-front",
            Section::Contracts => "bi-file-earmark-text",
            Section::Finance => "bi-currency-dollar",
            Section::Risk => "bi-shield",
            Section::Penalties => "bi-exclamation-triangle",
            Section::Maintenance => "bi-wrench",
            Section::Warehouse => "bi-box-seam",
            Section::Counterparties => "bi-people",
            Section::Settings => "bi-gear",
        }
    }

    /// Placeholder copy; `None` for sections with a working page.
    pub const fn placeholder(self) -> Option<SectionText> {
        let text = match self {
            Section::Fleet => return None,
            Section::Dashboard => SectionText {
                title: "Дашборд",
                subtitle: "Добро пожаловать в DriveCore v2",
                heading: "Система управления автопарком",
                body: "Здесь будет отображаться основная информация о состоянии автопарка, статистика и ключевые показатели.",
            },
            Section::Contracts => SectionText {
                title: "Договоры",
                subtitle: "Управление договорами и соглашениями",
                heading: "Договоры",
                body: "Здесь будет список всех договоров, их статус, сроки действия и связанные документы.",
            },
            Section::Finance => SectionText {
                title: "Финансы",
                subtitle: "Финансовый учёт и отчётность",
                heading: "Финансы",
                body: "Здесь будет финансовая отчётность, доходы, расходы, бюджеты и анализ рентабельности.",
            },
            Section::Risk => SectionText {
                title: "Риски",
                subtitle: "Управление рисками и страхование",
                heading: "Риски",
                body: "Здесь будет оценка рисков, страховые полисы, инциденты и мероприятия по снижению рисков.",
            },
            Section::Penalties => SectionText {
                title: "Штрафы",
                subtitle: "Учёт штрафов и нарушений",
                heading: "Штрафы",
                body: "Здесь будет список всех штрафов, их статус, суммы к оплате и история нарушений.",
            },
            Section::Maintenance => SectionText {
                title: "ТО и ремонты",
                subtitle: "Техническое обслуживание и ремонты",
                heading: "ТО и ремонты",
                body: "Здесь будет планирование и учёт технического обслуживания, ремонтов и замены запчастей.",
            },
            Section::Warehouse => SectionText {
                title: "Склад",
                subtitle: "Управление складскими запасами",
                heading: "Склад",
                body: "Здесь будет учёт запчастей, расходных материалов, остатков и движения товаров на складе.",
            },
            Section::Counterparties => SectionText {
                title: "Контрагенты",
                subtitle: "Управление контрагентами и партнёрами",
                heading: "Контрагенты",
                body: "Здесь будет справочник контрагентов, поставщиков, клиентов и партнёров компании.",
            },
            Section::Settings => SectionText {
                title: "Настройки",
                subtitle: "Настройки системы и пользователей",
                heading: "Настройки",
                body: "Здесь будут настройки системы, пользователей, интеграций и конфигурация приложения.",
            },
        };
        Some(text)
    }
}
