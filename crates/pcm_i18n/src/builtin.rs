//! Korean/English catalog compiled into the binary.
//!
//! [`Key`] is the closed set of built-in keys. [`catalog`] checks it against
//! the Korean dictionary so a missing or stray key fails at startup instead of
//! surfacing as a raw key on screen.

use std::fmt;
use std::str::FromStr;

use crate::catalog::Catalog;
use crate::language::canonicalize_language;
use crate::translator::Translator;
use crate::I18nError;

/// Built-in languages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    pub const DEFAULT: Language = Language::Ko;
    pub const ALL: &'static [Language] = &[Language::Ko, Language::En];

    pub const fn code(self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

impl AsRef<str> for Language {
    fn as_ref(&self) -> &str {
        self.code()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = canonicalize_language(s)?;
        Language::ALL
            .iter()
            .copied()
            .find(|l| l.code() == code)
            .ok_or_else(|| I18nError::UnknownLanguage {
                language: s.to_string(),
                known: Language::ALL.iter().map(|l| l.code().to_string()).collect(),
            })
    }
}

macro_rules! translation_keys {
    ($($variant:ident => $key:literal,)*) => {
        /// Every key of the built-in catalog.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum Key {
            $($variant,)*
        }

        impl Key {
            pub const ALL: &'static [Key] = &[$(Key::$variant,)*];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Key::$variant => $key,)*
                }
            }
        }
    };
}

translation_keys! {
    // common
    Confirm => "confirm",
    Cancel => "cancel",
    Save => "save",
    Delete => "delete",
    Add => "add",
    Edit => "edit",
    Close => "close",
    Search => "search",
    Loading => "loading",
    Refresh => "refresh",
    Logout => "logout",
    NoData => "no_data",
    All => "all",
    Home => "home",
    LangSelect => "lang_select",
    // sidebar
    MenuHome => "menu_home",
    MenuCost => "menu_cost",
    MenuExplorer => "menu_explorer",
    MenuDashboard => "menu_dashboard",
    MenuMaster => "menu_master",
    MenuPlant => "menu_plant",
    MenuMaterial => "menu_material",
    MenuMachine => "menu_machine",
    MenuLabor => "menu_labor",
    MenuOverhead => "menu_overhead",
    MenuFactor => "menu_factor",
    MenuExchange => "menu_exchange",
    MenuSystem => "menu_system",
    MenuUser => "menu_user",
    MenuConfig => "menu_config",
    // user
    UserTitle => "user_title",
    UserSearchPlaceholder => "user_search_placeholder",
    UserFilterDept => "user_filter_dept",
    UserFilterRole => "user_filter_role",
    UserFilterStatus => "user_filter_status",
    UserStatusActive => "user_status_active",
    UserStatusInactive => "user_status_inactive",
    UserBtnApi => "user_btn_api",
    UserBtnExportUser => "user_btn_export_user",
    UserBtnExportLog => "user_btn_export_log",
    UserThNo => "user_th_no",
    UserThId => "user_th_id",
    UserThName => "user_th_name",
    UserThDept => "user_th_dept",
    UserThRole => "user_th_role",
    UserThStatus => "user_th_status",
    UserThManage => "user_th_manage",
    UserModalAddTitle => "user_modal_add_title",
    UserModalEditTitle => "user_modal_edit_title",
    UserModalDesc => "user_modal_desc",
    UserModalDescSub => "user_modal_desc_sub",
    LabelId => "label_id",
    LabelPwd => "label_pwd",
    LabelPwdChange => "label_pwd_change",
    LabelName => "label_name",
    LabelDept => "label_dept",
    LabelRole => "label_role",
    LabelActiveAccount => "label_active_account",
    PlaceholderId => "placeholder_id",
    PlaceholderPwd => "placeholder_pwd",
    PlaceholderName => "placeholder_name",
    PlaceholderDept => "placeholder_dept",
    ConnModalTitle => "conn_modal_title",
    ConnModalDesc => "conn_modal_desc",
    ConnModalWarn => "conn_modal_warn",
    LabelAuthKey => "label_auth_key",
    LabelAuthSecret => "label_auth_secret",
    ExportModalTitle => "export_modal_title",
    ExportModalDesc => "export_modal_desc",
    LabelExportTarget => "label_export_target",
    TargetWeb => "target_web",
    TargetTcpcm => "target_tcpcm",
    LabelPeriod => "label_period",
    LabelAllPeriod => "label_all_period",
    LabelUserName => "label_user_name",
    LabelRoleFilter => "label_role_filter",
    BtnExport => "btn_export",
    HistoryModalTitle => "history_modal_title",
    HistoryModalDesc => "history_modal_desc",
    HistoryThTime => "history_th_time",
    HistoryThIp => "history_th_ip",
    HistoryThType => "history_th_type",
    HistoryThResult => "history_th_result",
    HistorySuccess => "history_success",
    HistoryFail => "history_fail",
    MsgNoHistory => "msg_no_history",
    MsgConfirmDelete => "msg_confirm_delete",
    MsgDeleted => "msg_deleted",
    MsgSaved => "msg_saved",
    MsgReqIdName => "msg_req_id_name",
    MsgReqInput => "msg_req_input",
    MsgNoDataCond => "msg_no_data_cond",
    // plant
    PlantTitle => "plant_title",
    PlantTabRegion => "plant_tab_region",
    PlantTabPlant => "plant_tab_plant",
    PlantUpload => "plant_upload",
    PlantDownload => "plant_download",
    PlantSaveDb => "plant_save_db",
    PlantHeaderNo => "plant_header_no",
    PlantHeaderRegion => "plant_header_region",
    PlantHeaderKey => "plant_header_key",
    PlantHeaderKo => "plant_header_ko",
    PlantHeaderEn => "plant_header_en",
    PlantMsgUploading => "plant_msg_uploading",
    PlantSheetSelect => "plant_sheet_select",
    PlantMsgValidRegion => "plant_msg_valid_region",
    PlantFilterAll => "plant_filter_all",
    // config
    ConfigTitle => "config_title",
    ConfigSearchPlaceholder => "config_search_placeholder",
    ConfigFilterClass => "config_filter_class",
    ConfigBtnAdd => "config_btn_add",
    ConfigThNo => "config_th_no",
    ConfigThClass => "config_th_class",
    ConfigThName => "config_th_name",
    ConfigThGuid => "config_th_guid",
    ConfigThManage => "config_th_manage",
    ConfigModalAdd => "config_modal_add",
    ConfigModalEdit => "config_modal_edit",
    ConfigLabelClass => "config_label_class",
    ConfigLabelName => "config_label_name",
    ConfigPlaceholderClass => "config_placeholder_class",
    ConfigPlaceholderName => "config_placeholder_name",
    ConfigMsgDeleteConfirm => "config_msg_delete_confirm",
    ConfigMsgSaveSuccess => "config_msg_save_success",
    ConfigMsgSaveFail => "config_msg_save_fail",
    ConfigMsgValidReq => "config_msg_valid_req",
    // cost
    CostExplorerTitle => "cost_explorer_title",
    CostAnalyticsTitle => "cost_analytics_title",
    CostSearchPlaceholder => "cost_search_placeholder",
    CostMsgSelectItem => "cost_msg_select_item",
    CostMsgAnalyzing => "cost_msg_analyzing",
    CostMsgSelectedId => "cost_msg_selected_id",
    CostMsgNoResults => "cost_msg_no_results",
    CostMsgEmpty => "cost_msg_empty",
    // master
    MasterTitle => "master_title",
    MasterDesc => "master_desc",
    MasterSubDesc => "master_sub_desc",
    // dashboard
    DashWelcome => "dash_welcome",
    DashSubtitle => "dash_subtitle",
    DashCardProjects => "dash_card_projects",
    DashCardStatus => "dash_card_status",
    DashStatusOk => "dash_status_ok",
    DashCardLastLogin => "dash_card_last_login",
    // empty
    EmptyTitle => "empty_title",
    // material
    MatTitle => "mat_title",
    MatTabProp => "mat_tab_prop",
    MatTabPrice => "mat_tab_price",
    MatTypeInjection => "mat_type_injection",
    MatTypeDiecasting => "mat_type_diecasting",
    MatTypePress => "mat_type_press",
    MatTypeCoil => "mat_type_coil",
    MatTypeMachining => "mat_type_machining",
    MatTypeOther => "mat_type_other",
    MatHeaderValidFrom => "mat_header_valid_from",
    MatHeaderRegion => "mat_header_region",
    MatHeaderCurrency => "mat_header_currency",
    MatHeaderName => "mat_header_name",
    MatHeaderCategory => "mat_header_category",
    MatHeaderDensity => "mat_header_density",
    MatHeaderUnit => "mat_header_unit",
    MatHeaderRevision => "mat_header_revision",
    MatHeaderPrice => "mat_header_price",
    MatHeaderScrapPrice => "mat_header_scrap_price",
    MatPropEjectionTemp => "mat_prop_ejection_temp",
    MatPropInjectionTemp => "mat_prop_injection_temp",
    MatPropMoldTemp => "mat_prop_mold_temp",
    MatPropPressureCoeff => "mat_prop_pressure_coeff",
    MatPropThermalDiff => "mat_prop_thermal_diff",
    MatPropCastingMax => "mat_prop_casting_max",
    MatPropCastingMin => "mat_prop_casting_min",
    MatPropTfactor => "mat_prop_tfactor",
    MatPropTensile => "mat_prop_tensile",
    MatPropShear => "mat_prop_shear",
    MatPropProdFactor => "mat_prop_prod_factor",
    MatBtnAdd => "mat_btn_add",
    MatMsgUploading => "mat_msg_uploading",
    MatDownloadPreviewTitle => "mat_download_preview_title",
    MatDownloadPreviewMsg => "mat_download_preview_msg",
    MatTotalItems => "mat_total_items",
    MatBtnSaveExcel => "mat_btn_save_excel",
    MatHeaderKey => "mat_header_key",
    MatMsgExtracting => "mat_msg_extracting",
    MatLabelIncludeSiemens => "mat_label_include_siemens",
    MatLabelSmartSearch => "mat_label_smart_search",
    MatBtnCancel => "mat_btn_cancel",
    MatMsgNoData => "mat_msg_no_data",
    MatMsgMoreItems => "mat_msg_more_items",
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! sections {
    ($lang:literal: $($name:literal),* $(,)?) => {
        [$(include_str!(concat!("../locales/", $lang, "/", $name, ".yaml")),)*]
    };
}

// Merge order of the application's locale index.
const KO_SECTIONS: [&str; 10] = sections!(
    "ko": "common", "sidebar", "user", "plant", "config", "cost", "master", "dashboard", "empty",
    "material",
);
const EN_SECTIONS: [&str; 10] = sections!(
    "en": "common", "sidebar", "user", "plant", "config", "cost", "master", "dashboard", "empty",
    "material",
);

/// Build the embedded catalog and validate it against [`Key`].
pub fn catalog() -> Result<Catalog, I18nError> {
    let mut builder = Catalog::builder(Language::DEFAULT.code());
    for src in KO_SECTIONS {
        builder = builder.source(Language::Ko.code(), src);
    }
    for src in EN_SECTIONS {
        builder = builder.source(Language::En.code(), src);
    }

    let catalog = builder.build()?;
    catalog.ensure_keys(Key::ALL)?;
    Ok(catalog)
}

/// A [`Translator`] over the embedded catalog, starting in Korean.
pub fn translator() -> Result<Translator, I18nError> {
    Ok(Translator::new(catalog()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholders;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_catalog_is_valid_and_complete() {
        let catalog = catalog().unwrap();
        assert_eq!(catalog.default_language(), "ko");
        assert_eq!(catalog.languages(), vec!["en", "ko"]);
        assert_eq!(catalog.default_dictionary().len(), Key::ALL.len());
        assert!(catalog.coverage().is_complete());
    }

    #[test]
    fn every_key_resolves_in_both_languages() {
        let tr = translator().unwrap();
        for lang in Language::ALL {
            tr.set_language(lang).unwrap();
            for key in Key::ALL {
                assert_ne!(tr.t(key), key.as_str(), "{lang}: {key} is untranslated");
            }
        }
    }

    #[test]
    fn dashboard_welcome_interpolates() {
        let tr = translator().unwrap();
        let args = placeholders! { name: "홍길동" };
        assert_eq!(
            tr.translate(Key::DashWelcome, Some(&args)),
            "반갑습니다, 홍길동님! 👋"
        );

        tr.set_language(Language::En).unwrap();
        assert_eq!(
            tr.translate(Key::DashWelcome, Some(&args)),
            "Welcome back, 홍길동! 👋"
        );
    }

    #[test]
    fn user_and_plant_sections_interpolate() {
        let tr = translator().unwrap();
        assert_eq!(
            tr.translate(Key::HistoryModalDesc, Some(&placeholders! { name: "김철수" })),
            "김철수 님의 시스템 접속 기록입니다."
        );

        tr.set_language(Language::En).unwrap();
        assert_eq!(
            tr.translate(Key::PlantMsgUploading, Some(&placeholders! { tab: "Region" })),
            "Uploading Region data."
        );
        assert_eq!(tr.t(Key::PlantSheetSelect), "Select Sheet:");
        assert_eq!(
            tr.t(Key::MsgConfirmDelete),
            "Are you sure you want to delete this user?\nThis cannot be undone."
        );
    }

    #[test]
    fn material_section_is_merged_last() {
        let catalog = catalog().unwrap();
        assert_eq!(Key::ALL.len(), 187);
        assert_eq!(catalog.template("ko", "mat_title"), Some("재료 관리"));
        assert_eq!(catalog.template("en", "mat_btn_cancel"), Some("Cancel"));
    }

    #[test]
    fn language_parses_from_tags() {
        assert_eq!("ko".parse::<Language>().unwrap(), Language::Ko);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert!(matches!(
            "fr".parse::<Language>(),
            Err(I18nError::UnknownLanguage { .. })
        ));
    }
}
